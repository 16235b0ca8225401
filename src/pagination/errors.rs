//! Paginator error types.

use thiserror::Error;

use crate::clients::{HttpError, HttpResponseError};

/// Errors that can occur while building or driving a [`Paginator`](super::Paginator).
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::PaginatorError;
///
/// let error = PaginatorError::OcapiMethodNotFound {
///     endpoint: "OrderSearch".to_string(),
///     method: "Delete".to_string(),
/// };
/// assert_eq!(error.to_string(), "OrderSearch has no method named \"Delete\"");
/// ```
#[derive(Debug, Error)]
pub enum PaginatorError {
    /// The endpoint has no resource to page over.
    #[error("{endpoint} is not an OCAPI Endpoint object.")]
    NotOcapiEndpoint {
        /// The endpoint type name.
        endpoint: String,
    },

    /// The endpoint does not support the requested operation.
    #[error("{endpoint} has no method named \"{method}\"")]
    OcapiMethodNotFound {
        /// The endpoint type name.
        endpoint: String,
        /// The requested operation name.
        method: String,
    },

    /// A message was written while the progress bar is hidden.
    #[error("Paginator progress bar is hidden, can't action.")]
    ProgressHidden,

    /// The page request failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A page came back with a non-2xx status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// A page body was not valid JSON.
    #[error("Failed to decode page: {0}")]
    Decode(#[from] serde_json::Error),

    /// A search expression failed to compile or evaluate.
    #[error("Invalid search expression '{expression}': {reason}")]
    Expression {
        /// The expression text.
        expression: String,
        /// The parser or interpreter message.
        reason: String,
    },
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PaginatorError>();
};
