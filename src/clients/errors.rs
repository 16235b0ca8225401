//! HTTP-specific error types for the OCAPI SDK.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, unsafe timeouts, and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses, with the OCAPI fault decoded
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`IdempotentTimeoutError`]: When a non-idempotent request timed out
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! The client itself never turns a non-2xx status into an error; callers opt
//! in with [`HttpResponse::error_for_status`](crate::HttpResponse::error_for_status).
//!
//! # Example
//!
//! ```rust,ignore
//! use salesforce_ocapi::HttpError;
//!
//! match client.post(url, Some(body.into()), None, None, false).await {
//!     Ok(response) => println!("{}", response.code),
//!     Err(HttpError::IdempotentTimeout(e)) => {
//!         println!("Not retried, the server may have applied it: {e}");
//!     }
//!     Err(HttpError::MaxRetries(e)) => {
//!         println!("Retries exhausted after {} tries", e.tries);
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::http_request::HttpMethod;

/// Header values replaced in error output.
const REDACTED_HEADERS: [&str; 1] = ["authorization"];

/// Error returned when a response has a non-2xx status.
///
/// OCAPI reports failures as a `fault` document; when the body carries one,
/// its `type` and `message` are decoded.
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "No order with number '0001' was found.".to_string(),
///     fault_type: Some("OrderNotFoundException".to_string()),
/// };
///
/// assert!(error.to_string().contains("OrderNotFoundException"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code}{}: {message}", fault_suffix(.fault_type))]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The fault message, or the raw body when no fault was present.
    pub message: String,
    /// The OCAPI fault type, e.g. `InvalidAccessTokenException`.
    pub fault_type: Option<String>,
}

fn fault_suffix(fault_type: &Option<String>) -> String {
    fault_type
        .as_ref()
        .map(|t| format!(" ({t})"))
        .unwrap_or_default()
}

/// Error returned when maximum retry attempts have been exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries} for {method} {url}. Last error: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP method of the request.
    pub method: HttpMethod,
    /// The request URL.
    pub url: String,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Description of the last failure.
    pub message: String,
}

/// Error returned when a non-idempotent request timed out.
///
/// The server may or may not have applied the request, so it is not retried.
/// The request is described in the error; `Authorization` values are
/// redacted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct IdempotentTimeoutError {
    /// The HTTP method of the request.
    pub method: HttpMethod,
    /// The request URL.
    pub url: String,
    /// The encoded request body, if any.
    pub body: Option<String>,
    /// The request headers, sorted by name, with credentials redacted.
    pub headers: Vec<(String, String)>,
}

impl IdempotentTimeoutError {
    /// Describes a timed-out request, redacting credentials.
    #[must_use]
    pub fn new<'a>(
        method: HttpMethod,
        url: impl Into<String>,
        body: Option<&str>,
        headers: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        let mut headers: Vec<(String, String)> = headers
            .into_iter()
            .map(|(name, value)| {
                let value = if REDACTED_HEADERS.contains(&name.to_lowercase().as_str()) {
                    "*****".to_string()
                } else {
                    value.clone()
                };
                (name.clone(), value)
            })
            .collect();
        headers.sort();

        Self {
            method,
            url: url.into(),
            body: body.map(str::to_string),
            headers,
        }
    }
}

impl fmt::Display for IdempotentTimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Attempted {} timed out and is not marked idempotent, it was not retried.",
            self.method
        )?;
        writeln!(f, "URL: {}", self.url)?;
        writeln!(f, "Body: {}", self.body.as_deref().unwrap_or("<none>"))?;
        write!(f, "Headers:")?;
        for (name, value) in &self.headers {
            write!(f, "\n  {name}: {value}")?;
        }
        Ok(())
    }
}

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::UnsupportedBody {
///     preview: "plain text".to_string(),
/// };
///
/// assert!(error.to_string().contains("JSON or XML"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A string body that is not XML.
    #[error("Request body must be JSON or XML, got: {preview}")]
    UnsupportedBody {
        /// The start of the rejected body.
        preview: String,
    },

    /// An endpoint operation was called without a required path argument.
    #[error("Missing required path argument '{name}'.")]
    MissingPathArgument {
        /// The argument name.
        name: &'static str,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// # Example
///
/// ```rust,ignore
/// use salesforce_ocapi::HttpError;
///
/// match client.get(url, None, None).await {
///     Ok(response) => { /* inspect response.code */ }
///     Err(HttpError::MaxRetries(e)) => { /* handle retry exhaustion */ }
///     Err(HttpError::IdempotentTimeout(e)) => { /* decide whether to resend */ }
///     Err(HttpError::Auth(e)) => { /* token could not be obtained */ }
///     Err(other) => { /* validation, network or status errors */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// A non-idempotent request timed out.
    #[error(transparent)]
    IdempotentTimeout(#[from] IdempotentTimeoutError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// An access token could not be obtained.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_http_response_error_message_includes_fault_type() {
        let error = HttpResponseError {
            code: 401,
            message: "The request is unauthorized.".to_string(),
            fault_type: Some("InvalidAccessTokenException".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "HTTP 401 (InvalidAccessTokenException): The request is unauthorized."
        );
    }

    #[test]
    fn test_http_response_error_without_fault() {
        let error = HttpResponseError {
            code: 502,
            message: "Bad Gateway".to_string(),
            fault_type: None,
        };
        assert_eq!(error.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            method: HttpMethod::Get,
            url: "https://example.com/dw/shop/v20_4/site".to_string(),
            tries: 3,
            message: "operation timed out".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("Exceeded maximum retry count of 3"));
        assert!(message.contains("GET"));
    }

    #[test]
    fn test_idempotent_timeout_redacts_authorization() {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer secret-token".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let error = IdempotentTimeoutError::new(
            HttpMethod::Post,
            "https://example.com/orders",
            Some(r#"{"a":1}"#),
            &headers,
        );
        let message = error.to_string();

        assert!(message.contains("Attempted POST timed out"));
        assert!(message.contains("https://example.com/orders"));
        assert!(message.contains(r#"{"a":1}"#));
        assert!(message.contains("Content-Type: application/json"));
        assert!(message.contains("Authorization: *****"));
        assert!(!message.contains("secret-token"));
    }

    #[test]
    fn test_unsupported_body_error() {
        let error = InvalidHttpRequestError::UnsupportedBody {
            preview: "hello".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Request body must be JSON or XML, got: hello"
        );
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let response_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
            fault_type: None,
        };
        let _ = response_error;

        let invalid_error: &dyn std::error::Error =
            &InvalidHttpRequestError::MissingPathArgument { name: "order_no" };
        let _ = invalid_error;
    }
}
