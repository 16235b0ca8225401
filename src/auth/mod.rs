//! Authentication types for the OCAPI SDK.
//!
//! This module provides the token provider that obtains and renews OAuth2
//! access tokens for Salesforce Commerce Cloud.
//!
//! # Overview
//!
//! - [`TokenProvider`]: Obtains tokens with the client credentials or
//!   Business Manager grant and renews them before expiry
//! - [`Token`]: A token record with its derived expiry time
//! - [`AuthError`]: Token acquisition failures
//!
//! # Grants
//!
//! The grant is chosen by the configuration. With Business Manager
//! credentials the provider impersonates that user against the instance;
//! otherwise it authenticates the API client against Account Manager.
//!
//! # Example
//!
//! ```rust
//! use salesforce_ocapi::auth::Token;
//!
//! let token = Token::new("access-token", 1799, 1_700_000_000);
//! assert_eq!(token.authorization_value(), "Bearer access-token");
//! ```

mod error;
mod provider;
mod token;

pub use error::{AuthError, AUTHENTICATION_ERRORS};
pub use provider::{Grant, TokenProvider, BM_USER_GRANT_TYPE, CLIENT_CREDENTIALS_GRANT_TYPE};
pub use token::{Token, EXPIRY_MARGIN_SECS};
