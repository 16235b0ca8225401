//! reqwest-backed WebDAV client.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};

use crate::auth::TokenProvider;
use crate::config::InstanceUrl;
use crate::error::ConfigError;
use crate::webdav::entry::normalize;
use crate::webdav::propfind::{parse_multistatus, PROPFIND_BODY};
use crate::webdav::{RemoteEntry, RemoteFileSystem, WebDavError};

/// Host-relative root of the site WebDAV folders.
pub const WEBDAV_ROOT: &str = "/on/demandware.servlet/webdav/Sites";

/// WebDAV methods outside the HTTP core set.
#[derive(Clone, Debug)]
struct DavMethods {
    propfind: Method,
    mkcol: Method,
    move_: Method,
}

impl DavMethods {
    fn new() -> Result<Self, WebDavError> {
        Ok(Self {
            propfind: dav_method("PROPFIND")?,
            mkcol: dav_method("MKCOL")?,
            move_: dav_method("MOVE")?,
        })
    }
}

fn dav_method(name: &str) -> Result<Method, WebDavError> {
    Method::from_bytes(name.as_bytes()).map_err(|e| WebDavError::Request {
        reason: format!("{name}: {e}"),
    })
}

/// A WebDAV client authenticating with the bearer token of a
/// [`TokenProvider`].
///
/// Paths are host-relative, e.g.
/// `/on/demandware.servlet/webdav/Sites/Impex/src/catalog.xml`. Calls are
/// made once; wrap the client in a
/// [`RetryingFileSystem`](crate::webdav::RetryingFileSystem) for retries.
///
/// # Example
///
/// ```rust,ignore
/// use salesforce_ocapi::webdav::{RemoteFileSystem, WebDavClient, WEBDAV_ROOT};
///
/// let dav = WebDavClient::new(provider)?;
/// for entry in dav.list(&format!("{WEBDAV_ROOT}/Impex/src")).await? {
///     println!("{} {:?}", entry.path, entry.size);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct WebDavClient {
    client: reqwest::Client,
    provider: Arc<TokenProvider>,
    host: InstanceUrl,
    methods: DavMethods,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebDavClient>();
};

impl WebDavClient {
    /// Creates a client for the provider's instance.
    ///
    /// # Errors
    ///
    /// Returns [`WebDavError::Config`] if the configuration has no instance,
    /// or [`WebDavError::Network`] if the reqwest client cannot be built.
    pub fn new(provider: Arc<TokenProvider>) -> Result<Self, WebDavError> {
        let host = provider
            .instance()
            .cloned()
            .ok_or(ConfigError::CredentialsMissing { field: "instance" })?;
        Self::with_host(provider, host)
    }

    /// Creates a client for another instance, sharing the provider's token.
    ///
    /// # Errors
    ///
    /// Returns [`WebDavError::Network`] if the reqwest client cannot be
    /// built.
    pub fn with_host(provider: Arc<TokenProvider>, host: InstanceUrl) -> Result<Self, WebDavError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(provider.config().timeout())
            .build()?;
        Ok(Self {
            client,
            provider,
            host,
            methods: DavMethods::new()?,
        })
    }

    /// Returns the host this client talks to.
    #[must_use]
    pub const fn host(&self) -> &InstanceUrl {
        &self.host
    }

    /// Returns the token provider.
    #[must_use]
    pub const fn provider(&self) -> &Arc<TokenProvider> {
        &self.provider
    }

    /// Builds the absolute URL for a host-relative path, percent-encoding
    /// each segment.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let encoded: Vec<String> = normalize(path)
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}{}", self.host.as_ref(), encoded.join("/"))
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, WebDavError> {
        let authorization = self.provider.auth_header().await?;
        let request = self
            .client
            .request(method.clone(), self.url(path))
            .header(AUTHORIZATION, authorization);

        tracing::debug!(method = %method, path, "Sending WebDAV request");
        let response = build(request).send().await?;
        check_status(method, path, response)
    }

    async fn propfind(&self, path: &str, depth: u8) -> Result<Vec<RemoteEntry>, WebDavError> {
        let response = self
            .send(&self.methods.propfind, path, |request| {
                request
                    .header("Depth", depth.to_string())
                    .header(CONTENT_TYPE, "application/xml")
                    .body(PROPFIND_BODY)
            })
            .await?;
        parse_multistatus(&response.text().await?)
    }
}

fn check_status(method: &Method, path: &str, response: Response) -> Result<Response, WebDavError> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(WebDavError::NotFound {
            path: path.to_string(),
        });
    }
    if !status.is_success() {
        tracing::warn!(method = %method, path, status = status.as_u16(), "WebDAV request failed");
        return Err(WebDavError::Status {
            method: method.to_string(),
            path: path.to_string(),
            code: status.as_u16(),
        });
    }
    Ok(response)
}

impl RemoteFileSystem for WebDavClient {
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, WebDavError> {
        let mut entries = self.propfind(path, 1).await?;
        if let Some(index) = entries.iter().position(|entry| entry.is_path(path)) {
            entries.remove(index);
        }
        Ok(entries)
    }

    async fn info(&self, path: &str) -> Result<RemoteEntry, WebDavError> {
        self.propfind(path, 0)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WebDavError::NotFound {
                path: path.to_string(),
            })
    }

    async fn upload(&self, path: &str, content: &[u8]) -> Result<(), WebDavError> {
        let body = content.to_vec();
        self.send(&Method::PUT, path, |request| request.body(body))
            .await?;
        Ok(())
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, WebDavError> {
        let response = self.send(&Method::GET, path, |request| request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn delete(&self, path: &str) -> Result<(), WebDavError> {
        self.send(&Method::DELETE, path, |request| request).await?;
        Ok(())
    }

    async fn move_to(&self, from: &str, to: &str, overwrite: bool) -> Result<(), WebDavError> {
        let destination = self.url(to);
        let overwrite = if overwrite { "T" } else { "F" };
        self.send(&self.methods.move_, from, |request| {
            request
                .header("Destination", destination)
                .header("Overwrite", overwrite)
        })
        .await?;
        Ok(())
    }

    async fn make_dir(&self, path: &str) -> Result<(), WebDavError> {
        self.send(&self.methods.mkcol, path, |request| request).await?;
        Ok(())
    }
}
