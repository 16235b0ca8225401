//! WebDAV error types.

use thiserror::Error;

use crate::auth::AuthError;
use crate::error::ConfigError;

/// Errors from the WebDAV file-transfer client.
#[derive(Debug, Error)]
pub enum WebDavError {
    /// The remote path does not exist.
    #[error("Remote resource not found: {path}")]
    NotFound {
        /// The remote path.
        path: String,
    },

    /// The server answered with an unexpected status.
    #[error("WebDAV {method} {path} failed with HTTP {code}")]
    Status {
        /// The WebDAV method.
        method: String,
        /// The remote path.
        path: String,
        /// The HTTP status code.
        code: u16,
    },

    /// The client has no host to talk to.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request could not be built.
    #[error("Invalid WebDAV request: {reason}")]
    Request {
        /// What was wrong with the request.
        reason: String,
    },

    /// A PROPFIND response could not be parsed.
    #[error("Failed to parse PROPFIND response: {reason}")]
    Parse {
        /// The parser message.
        reason: String,
    },

    /// A local file could not be read or written.
    #[error("Local file error for {path}: {reason}")]
    LocalFile {
        /// The local path.
        path: String,
        /// The I/O error message.
        reason: String,
    },

    /// Every attempt allowed by the retry policy failed.
    #[error("WebDAV {operation} gave up after {attempts} attempts: {last}")]
    MaxRetries {
        /// The operation name.
        operation: &'static str,
        /// Number of calls made.
        attempts: u32,
        /// The error from the final call.
        last: Box<WebDavError>,
    },

    /// The bearer token could not be refreshed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request could not be sent or the response not read.
    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

impl WebDavError {
    /// Returns `true` for failures worth another attempt: transport errors,
    /// rejected tokens and server errors.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Auth(AuthError::Network(_)) => true,
            Self::Status { code, .. } => *code == 401 || *code >= 500,
            _ => false,
        }
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebDavError>();
};
