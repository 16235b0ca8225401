//! Retry and re-authentication around a remote filesystem.

use std::future::Future;
use std::sync::Arc;

use crate::auth::TokenProvider;
use crate::clients::{Attempt, RetryFailure, RetryPolicy};
use crate::webdav::{RemoteEntry, RemoteFileSystem, WebDavError};

/// Wraps every operation of a [`RemoteFileSystem`] in a [`RetryPolicy`].
///
/// Before each attempt the token is refreshed if it has expired. Transient
/// failures (see [`WebDavError::is_transient`]) are retried; anything else
/// fails at once.
///
/// # Example
///
/// ```rust,ignore
/// use salesforce_ocapi::webdav::{RetryingFileSystem, WebDavClient};
///
/// let dav = WebDavClient::new(provider.clone())?;
/// let dav = RetryingFileSystem::new(dav, provider);
/// dav.make_dir("/on/demandware.servlet/webdav/Sites/Impex/src/upload").await?;
/// ```
#[derive(Clone, Debug)]
pub struct RetryingFileSystem<F> {
    inner: F,
    provider: Arc<TokenProvider>,
    policy: RetryPolicy,
}

impl<F: RemoteFileSystem> RetryingFileSystem<F> {
    /// Wraps `inner` with the provider's configured retry policy.
    #[must_use]
    pub fn new(inner: F, provider: Arc<TokenProvider>) -> Self {
        let policy = *provider.config().retry_policy();
        Self {
            inner,
            provider,
            policy,
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the wrapped filesystem.
    #[must_use]
    pub const fn inner(&self) -> &F {
        &self.inner
    }

    async fn retry<T, C, Fut>(
        &self,
        operation: &'static str,
        path: &str,
        mut call: C,
    ) -> Result<T, WebDavError>
    where
        C: FnMut() -> Fut,
        Fut: Future<Output = Result<T, WebDavError>>,
    {
        let provider = &self.provider;
        let result = self
            .policy
            .run(|attempt| {
                let call = call();
                async move {
                    provider
                        .ensure_fresh()
                        .await
                        .map_err(|e| classify(operation, path, attempt, e.into()))?;
                    call.await
                        .map_err(|e| classify(operation, path, attempt, e))
                }
            })
            .await;

        result.map_err(|failure| match failure {
            RetryFailure::Exhausted { attempts, last } => WebDavError::MaxRetries {
                operation,
                attempts,
                last: Box::new(last),
            },
            RetryFailure::Fatal(error) => error,
        })
    }
}

fn classify(
    operation: &'static str,
    path: &str,
    attempt: u32,
    error: WebDavError,
) -> Attempt<WebDavError> {
    if error.is_transient() {
        tracing::warn!(operation, path, attempt, error = %error, "WebDAV call failed");
        Attempt::Retry(error)
    } else {
        Attempt::Fail(error)
    }
}

impl<F: RemoteFileSystem> RemoteFileSystem for RetryingFileSystem<F> {
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, WebDavError> {
        self.retry("list", path, || self.inner.list(path)).await
    }

    async fn info(&self, path: &str) -> Result<RemoteEntry, WebDavError> {
        self.retry("info", path, || self.inner.info(path)).await
    }

    async fn upload(&self, path: &str, content: &[u8]) -> Result<(), WebDavError> {
        self.retry("upload", path, || self.inner.upload(path, content))
            .await
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, WebDavError> {
        self.retry("download", path, || self.inner.download(path))
            .await
    }

    async fn delete(&self, path: &str) -> Result<(), WebDavError> {
        self.retry("delete", path, || self.inner.delete(path)).await
    }

    async fn move_to(&self, from: &str, to: &str, overwrite: bool) -> Result<(), WebDavError> {
        self.retry("move", from, || self.inner.move_to(from, to, overwrite))
            .await
    }

    async fn make_dir(&self, path: &str) -> Result<(), WebDavError> {
        self.retry("make_dir", path, || self.inner.make_dir(path))
            .await
    }
}
