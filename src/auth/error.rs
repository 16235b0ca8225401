//! Authentication error types for the OCAPI SDK.
//!
//! # Example
//!
//! ```rust
//! use salesforce_ocapi::auth::AuthError;
//!
//! let error = AuthError::AuthenticationFailure {
//!     error: "invalid_client".to_string(),
//!     description: Some("Client authentication failed".to_string()),
//! };
//! assert!(error.to_string().contains("invalid_client"));
//! ```

use thiserror::Error;

/// Token endpoint `error` codes that mean the credentials were rejected.
pub const AUTHENTICATION_ERRORS: [&str; 2] = ["unauthorized_client", "invalid_client"];

/// Errors that can occur while obtaining an access token.
///
/// # Thread Safety
///
/// `AuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the credentials.
    #[error("Authentication failed, credentials not valid: {error}{}", describe(.description))]
    AuthenticationFailure {
        /// The OAuth `error` code.
        error: String,
        /// The OAuth `error_description`, if any.
        description: Option<String>,
    },

    /// The token endpoint returned something that is neither a token nor a
    /// recognized rejection.
    #[error("Unrecognized token response (HTTP {status}): {body}")]
    UnrecognizedAuthResponse {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The token request could not be sent or its response could not be read.
    #[error("Network error while requesting token: {0}")]
    Network(#[from] reqwest::Error),
}

fn describe(description: &Option<String>) -> String {
    description
        .as_ref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failure_message() {
        let error = AuthError::AuthenticationFailure {
            error: "unauthorized_client".to_string(),
            description: None,
        };
        assert_eq!(
            error.to_string(),
            "Authentication failed, credentials not valid: unauthorized_client"
        );
    }

    #[test]
    fn test_unrecognized_response_keeps_status_and_body() {
        let error = AuthError::UnrecognizedAuthResponse {
            status: 503,
            body: "<html>maintenance</html>".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("maintenance"));
    }
}
