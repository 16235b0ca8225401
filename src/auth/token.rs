//! Access tokens returned by the OCAPI token endpoints.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::error::{AuthError, AUTHENTICATION_ERRORS};

/// Seconds subtracted from `expires_in` so a token is renewed before the
/// server rejects it.
pub const EXPIRY_MARGIN_SECS: i64 = 15;

/// An access token record.
///
/// Holds the fields of the token response plus the derived `expires_at`
/// (issue time + `expires_in` − 15 seconds, as a Unix timestamp). Unknown
/// response fields are kept in `extra`.
///
/// The `Debug` implementation masks the access token.
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::auth::Token;
///
/// let token = Token::new("abc", 1799, 1_700_000_000);
/// assert_eq!(token.expires_at, 1_700_000_000 + 1799 - 15);
/// assert!(!token.is_expired_at(1_700_000_000));
/// assert!(token.is_expired_at(token.expires_at));
/// ```
#[derive(Clone, PartialEq, Serialize)]
pub struct Token {
    /// The bearer token.
    pub access_token: String,
    /// Lifetime in seconds as reported by the server.
    pub expires_in: i64,
    /// Token type, normally `Bearer`.
    pub token_type: String,
    /// Unix timestamp after which the token is renewed.
    pub expires_at: i64,
    /// Any other response fields, e.g. `scope`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    /// Creates a token issued at `issued_at` (Unix seconds).
    #[must_use]
    pub fn new(access_token: impl Into<String>, expires_in: i64, issued_at: i64) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in,
            token_type: default_token_type(),
            expires_at: issued_at + expires_in - EXPIRY_MARGIN_SECS,
            extra: Map::new(),
        }
    }

    /// Returns `true` if the token must be renewed at `now` (Unix seconds).
    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// Returns `true` if the token must be renewed now.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Returns the token scope, if the server reported one.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.extra.get("scope").and_then(Value::as_str)
    }

    /// Interprets a token endpoint response.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AuthenticationFailure`] when the body carries an
    /// `unauthorized_client` or `invalid_client` error, and
    /// [`AuthError::UnrecognizedAuthResponse`] for any other non-token
    /// response, including non-JSON bodies.
    pub fn from_response(status: u16, body: &str, issued_at: i64) -> Result<Self, AuthError> {
        let unrecognized = || AuthError::UnrecognizedAuthResponse {
            status,
            body: body.to_string(),
        };

        let value: Value = serde_json::from_str(body).map_err(|_| unrecognized())?;

        if status == 200 && value.get("access_token").is_some() {
            let response: TokenResponse =
                serde_json::from_value(value).map_err(|_| unrecognized())?;
            return Ok(Self {
                access_token: response.access_token,
                expires_in: response.expires_in,
                token_type: response.token_type,
                expires_at: issued_at + response.expires_in - EXPIRY_MARGIN_SECS,
                extra: response.extra,
            });
        }

        match value.get("error").and_then(Value::as_str) {
            Some(error) if AUTHENTICATION_ERRORS.contains(&error) => {
                Err(AuthError::AuthenticationFailure {
                    error: error.to_string(),
                    description: value
                        .get("error_description")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
            }
            _ => Err(unrecognized()),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"*****")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("extra", &self.extra)
            .finish()
    }
}
