//! Error types for the OCAPI SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Missing credentials are reported before any network
//! call is attempted.
//!
//! # Example
//!
//! ```rust
//! use salesforce_ocapi::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyValue { field: "client_id" })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when resolving
/// credentials or validating configuration types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required credential was not supplied by any source.
    #[error("Credentials missing, check credentials file or environmental variables: '{field}' was not provided.")]
    CredentialsMissing {
        /// The name of the missing credential.
        field: &'static str,
    },

    /// A credential or setting was supplied but empty.
    #[error("'{field}' cannot be empty.")]
    EmptyValue {
        /// The name of the empty field.
        field: &'static str,
    },

    /// Instance URL is invalid.
    #[error("Invalid instance URL '{url}'. Expected a URL with scheme (e.g., 'https://dev01-eu01-example.demandware.net').")]
    InvalidInstanceUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// OCAPI version is invalid.
    #[error("Invalid OCAPI version '{version}'. Expected format: 'vYY_N' (e.g., 'v20_4').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// The requested profile section does not exist in the credentials file.
    #[error("Profile '{profile}' not found in credentials file '{path}'.")]
    ProfileNotFound {
        /// Path of the credentials file.
        path: String,
        /// The requested section name.
        profile: String,
    },

    /// A credentials or `.env` file could not be read or parsed.
    #[error("Failed to read '{path}': {reason}")]
    FileRead {
        /// Path of the file.
        path: String,
        /// Underlying reason.
        reason: String,
    },
}
