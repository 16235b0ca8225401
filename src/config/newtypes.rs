//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated OCAPI client ID.
///
/// Client IDs are issued by Account Manager and identify the API client
/// for both the client credentials and the business manager grants.
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::ClientId;
///
/// let id = ClientId::new("11111111-2222-3333-4444-555555555555").unwrap();
/// assert_eq!(id.as_ref(), "11111111-2222-3333-4444-555555555555");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyValue { field: "client_id" });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OCAPI client secret.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ClientSecret(*****)` instead of the actual secret.
///
/// ```rust
/// use salesforce_ocapi::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyValue {
                field: "client_secret",
            });
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A Business Manager user name, local or SSO.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmUser(String);

impl BmUser {
    /// Creates a new validated Business Manager user name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if the user name is empty.
    pub fn new(user: impl Into<String>) -> Result<Self, ConfigError> {
        let user = user.into();
        if user.trim().is_empty() {
            return Err(ConfigError::EmptyValue { field: "bm_user" });
        }
        Ok(Self(user))
    }
}

impl AsRef<str> for BmUser {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A Business Manager password, masked in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct BmPassword(String);

impl BmPassword {
    /// Creates a new validated Business Manager password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyValue {
                field: "bm_password",
            });
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for BmPassword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BmPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BmPassword(*****)")
    }
}

/// A validated Commerce Cloud instance URL.
///
/// The URL must carry an `http` or `https` scheme and a host. Trailing
/// slashes are removed so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::InstanceUrl;
///
/// let url = InstanceUrl::new("https://dev01-eu01-example.demandware.net/").unwrap();
/// assert_eq!(url.as_ref(), "https://dev01-eu01-example.demandware.net");
/// assert_eq!(url.host_name(), "dev01-eu01-example.demandware.net");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceUrl {
    url: String,
    host_start: usize,
}

impl InstanceUrl {
    /// Creates a new validated instance URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInstanceUrl`] if the URL has no
    /// `http`/`https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let Some(scheme_end) = url.find("://") else {
            return Err(ConfigError::InvalidInstanceUrl { url });
        };

        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidInstanceUrl { url });
        }

        let host_start = scheme_end + 3;
        let host = &url[host_start..];
        if host.is_empty() || host.starts_with(['/', ':', '?', '#']) {
            return Err(ConfigError::InvalidInstanceUrl { url });
        }

        Ok(Self { url, host_start })
    }

    /// Returns the host portion of the URL, including any port or path.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..]
    }
}

impl AsRef<str> for InstanceUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for InstanceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for InstanceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for InstanceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A site scope for OCAPI URLs.
///
/// The wildcard site `-` addresses the organization (global) context and is
/// the default for Data API endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteId(String);

impl SiteId {
    /// The organization-wide site scope.
    pub const GLOBAL: &'static str = "-";

    /// Creates a new validated site ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if the site ID is empty or
    /// contains a path separator.
    pub fn new(site: impl Into<String>) -> Result<Self, ConfigError> {
        let site = site.into();
        if site.trim().is_empty() || site.contains('/') {
            return Err(ConfigError::EmptyValue { field: "site" });
        }
        Ok(Self(site))
    }

    /// Returns the organization-wide site scope (`-`).
    #[must_use]
    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }

    /// Returns `true` if this is the organization-wide scope.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.0 == Self::GLOBAL
    }
}

impl Default for SiteId {
    fn default() -> Self {
        Self::global()
    }
}

impl AsRef<str> for SiteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
