//! Configuration types for the OCAPI SDK.
//!
//! This module provides the core configuration types used to initialize
//! the token provider and the HTTP client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`OcapiConfig`]: The resolved configuration holding all SDK settings
//! - [`OcapiConfigBuilder`]: A builder that resolves credentials from explicit
//!   values, the environment and a profile file
//! - [`CredentialSource`]: A snapshot of credentials from one source
//! - [`ClientId`], [`ClientSecret`], [`BmUser`], [`BmPassword`]: Credential newtypes
//! - [`InstanceUrl`], [`SiteId`], [`ApiVersion`]: Addressing types
//!
//! # Credential Precedence
//!
//! Each credential is resolved independently, in this order:
//!
//! 1. Values set explicitly on the builder
//! 2. The [`environment`](OcapiConfigBuilder::environment) source
//! 3. The [`profile`](OcapiConfigBuilder::profile) source
//!
//! Resolution happens once, in [`OcapiConfigBuilder::build`].
//!
//! # Example
//!
//! ```rust
//! use salesforce_ocapi::{OcapiConfig, ClientId, ClientSecret, CredentialSource};
//!
//! let config = OcapiConfig::builder()
//!     .client_id(ClientId::new("11111111-2222-3333-4444-555555555555").unwrap())
//!     .environment(CredentialSource::from_env_vars([("OCAPI_CLIENT_SECRET", "secret")]))
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.is_business_manager_grant());
//! ```

mod newtypes;
mod sources;
mod version;

pub use newtypes::{BmPassword, BmUser, ClientId, ClientSecret, InstanceUrl, SiteId};
pub use sources::{
    default_profile_path, CredentialSource, CREDENTIAL_KEYS, DEFAULT_PROFILE, ENV_VARS,
};
pub use version::ApiVersion;

use std::fmt;
use std::time::Duration;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Default Account Manager host used for the client credentials grant.
pub const DEFAULT_ACCOUNT_MANAGER_HOST: &str = "https://account.demandware.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Business Manager credentials used for the impersonation grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusinessUser {
    /// Business Manager user name.
    pub user: BmUser,
    /// Business Manager password.
    pub password: BmPassword,
}

/// HTTP basic auth credentials that replace the bearer `Authorization` header.
///
/// Used for storefronts protected by basic auth. The password is masked in
/// debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    user: String,
    password: String,
}

impl BasicAuth {
    /// Creates basic auth credentials.
    #[must_use]
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns the user name.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("password", &"*****")
            .finish()
    }
}

/// Configuration for the OCAPI SDK.
///
/// Holds credentials, addressing and transport settings. All credential
/// sources have already been resolved when an `OcapiConfig` exists.
///
/// # Grant Selection
///
/// When Business Manager credentials are present the token provider uses
/// the impersonation grant against the instance; otherwise it uses the
/// client credentials grant against Account Manager.
///
/// # Thread Safety
///
/// `OcapiConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct OcapiConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    instance: Option<InstanceUrl>,
    business_user: Option<BusinessUser>,
    account_manager_host: InstanceUrl,
    api_version: ApiVersion,
    timeout: Duration,
    retry_policy: RetryPolicy,
    basic_auth: Option<BasicAuth>,
    user_agent_prefix: Option<String>,
}

impl OcapiConfig {
    /// Creates a new builder for constructing an `OcapiConfig`.
    #[must_use]
    pub fn builder() -> OcapiConfigBuilder {
        OcapiConfigBuilder::new()
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the instance URL, if configured.
    #[must_use]
    pub const fn instance(&self) -> Option<&InstanceUrl> {
        self.instance.as_ref()
    }

    /// Returns the Business Manager credentials, if configured.
    #[must_use]
    pub const fn business_user(&self) -> Option<&BusinessUser> {
        self.business_user.as_ref()
    }

    /// Returns `true` when tokens are obtained with the Business Manager grant.
    #[must_use]
    pub const fn is_business_manager_grant(&self) -> bool {
        self.business_user.is_some()
    }

    /// Returns the Account Manager host.
    #[must_use]
    pub const fn account_manager_host(&self) -> &InstanceUrl {
        &self.account_manager_host
    }

    /// Returns the OCAPI version used in endpoint URLs.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the retry policy for timed-out requests.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the basic auth override, if configured.
    #[must_use]
    pub const fn basic_auth(&self) -> Option<&BasicAuth> {
        self.basic_auth.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify OcapiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OcapiConfig>();
};

/// Builder for constructing [`OcapiConfig`] instances.
///
/// `client_id` and `client_secret` are required from some source. Business
/// Manager credentials are optional but must be supplied as a pair, and
/// require an instance URL.
///
/// # Defaults
///
/// - `account_manager_host`: `https://account.demandware.com`
/// - `api_version`: `v20_4`
/// - `timeout`: 10 seconds
/// - `retry_policy`: [`RetryPolicy::default`]
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::{OcapiConfig, CredentialSource};
///
/// let profile = CredentialSource::from_profile_str(
///     "[default]\nclient_id = id\nclient_secret = secret\n\n\
///      [dev15]\ninstance = https://dev15.example.com\nbm_user = me@example.com\nbm_password = pw\n",
///     "dev15",
/// )
/// .unwrap();
///
/// let config = OcapiConfig::builder().profile(profile).build().unwrap();
/// assert!(config.is_business_manager_grant());
/// assert_eq!(config.instance().unwrap().as_ref(), "https://dev15.example.com");
/// ```
#[derive(Debug, Default)]
pub struct OcapiConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    instance: Option<InstanceUrl>,
    bm_user: Option<BmUser>,
    bm_password: Option<BmPassword>,
    account_manager_host: Option<InstanceUrl>,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
    basic_auth: Option<BasicAuth>,
    user_agent_prefix: Option<String>,
    environment: CredentialSource,
    profile: CredentialSource,
}

impl OcapiConfigBuilder {
    /// Creates a new builder with default values and no credential sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID.
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the client secret.
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the instance URL.
    #[must_use]
    pub fn instance(mut self, instance: InstanceUrl) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Sets the Business Manager user name.
    #[must_use]
    pub fn bm_user(mut self, user: BmUser) -> Self {
        self.bm_user = Some(user);
        self
    }

    /// Sets the Business Manager password.
    #[must_use]
    pub fn bm_password(mut self, password: BmPassword) -> Self {
        self.bm_password = Some(password);
        self
    }

    /// Overrides the Account Manager host.
    #[must_use]
    pub fn account_manager_host(mut self, host: InstanceUrl) -> Self {
        self.account_manager_host = Some(host);
        self
    }

    /// Sets the OCAPI version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the retry policy for timed-out requests.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Replaces the bearer `Authorization` header with basic auth.
    #[must_use]
    pub fn basic_auth(mut self, auth: BasicAuth) -> Self {
        self.basic_auth = Some(auth);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the environment source, consulted after explicit values.
    ///
    /// Typically [`CredentialSource::from_env`] or
    /// [`CredentialSource::from_dotenv`].
    #[must_use]
    pub fn environment(mut self, source: CredentialSource) -> Self {
        self.environment = source;
        self
    }

    /// Sets the profile source, consulted last.
    #[must_use]
    pub fn profile(mut self, source: CredentialSource) -> Self {
        self.profile = source;
        self
    }

    /// Builds the [`OcapiConfig`], resolving every credential once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialsMissing`] if `client_id` or
    /// `client_secret` cannot be resolved, if only one of `bm_user` and
    /// `bm_password` is available, or if Business Manager credentials are
    /// present without an instance. Values taken from a source are validated
    /// with the same rules as the newtype constructors.
    pub fn build(self) -> Result<OcapiConfig, ConfigError> {
        let client_id = self
            .resolve("client_id", self.client_id.clone(), ClientId::new)?
            .ok_or(ConfigError::CredentialsMissing { field: "client_id" })?;
        let client_secret = self
            .resolve("client_secret", self.client_secret.clone(), ClientSecret::new)?
            .ok_or(ConfigError::CredentialsMissing {
                field: "client_secret",
            })?;
        let instance = self.resolve("instance", self.instance.clone(), InstanceUrl::new)?;
        let bm_user = self.resolve("bm_user", self.bm_user.clone(), BmUser::new)?;
        let bm_password = self.resolve("bm_password", self.bm_password.clone(), BmPassword::new)?;

        let business_user = match (bm_user, bm_password) {
            (Some(user), Some(password)) => Some(BusinessUser { user, password }),
            (Some(_), None) => {
                return Err(ConfigError::CredentialsMissing {
                    field: "bm_password",
                })
            }
            (None, Some(_)) => return Err(ConfigError::CredentialsMissing { field: "bm_user" }),
            (None, None) => None,
        };

        if business_user.is_some() && instance.is_none() {
            return Err(ConfigError::CredentialsMissing { field: "instance" });
        }

        let account_manager_host = match self.account_manager_host {
            Some(host) => host,
            None => InstanceUrl::new(DEFAULT_ACCOUNT_MANAGER_HOST)?,
        };

        Ok(OcapiConfig {
            client_id,
            client_secret,
            instance,
            business_user,
            account_manager_host,
            api_version: self.api_version.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry_policy: self.retry_policy.unwrap_or_default(),
            basic_auth: self.basic_auth,
            user_agent_prefix: self.user_agent_prefix,
        })
    }

    fn resolve<T>(
        &self,
        key: &str,
        explicit: Option<T>,
        parse: impl Fn(String) -> Result<T, ConfigError>,
    ) -> Result<Option<T>, ConfigError> {
        if explicit.is_some() {
            return Ok(explicit);
        }
        self.environment
            .get(key)
            .or_else(|| self.profile.get(key))
            .map(|value| parse(value.to_string()))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret_source() -> CredentialSource {
        CredentialSource::from_env_vars([
            ("OCAPI_CLIENT_ID", "env-id"),
            ("OCAPI_CLIENT_SECRET", "env-secret"),
        ])
    }

    #[test]
    fn test_builder_requires_client_id() {
        let result = OcapiConfigBuilder::new()
            .client_secret(ClientSecret::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::CredentialsMissing { field: "client_id" })
        ));
    }

    #[test]
    fn test_builder_requires_client_secret() {
        let result = OcapiConfigBuilder::new()
            .client_id(ClientId::new("id").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::CredentialsMissing {
                field: "client_secret"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = OcapiConfig::builder()
            .environment(secret_source())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::V20_4);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.retry_policy(), &RetryPolicy::default());
        assert_eq!(
            config.account_manager_host().as_ref(),
            DEFAULT_ACCOUNT_MANAGER_HOST
        );
        assert!(config.instance().is_none());
        assert!(config.basic_auth().is_none());
        assert!(!config.is_business_manager_grant());
    }

    #[test]
    fn test_explicit_values_beat_environment_and_profile() {
        let profile = CredentialSource::from_profile_str(
            "[default]\nclient_id = profile-id\nclient_secret = profile-secret\ninstance = https://profile.example.com\n",
            "default",
        )
        .unwrap();

        let config = OcapiConfig::builder()
            .client_id(ClientId::new("explicit-id").unwrap())
            .environment(secret_source())
            .profile(profile)
            .build()
            .unwrap();

        assert_eq!(config.client_id().as_ref(), "explicit-id");
        assert_eq!(config.client_secret().as_ref(), "env-secret");
        assert_eq!(
            config.instance().map(AsRef::as_ref),
            Some("https://profile.example.com")
        );
    }

    #[test]
    fn test_business_user_requires_both_halves() {
        let result = OcapiConfig::builder()
            .environment(secret_source())
            .instance(InstanceUrl::new("https://dev.example.com").unwrap())
            .bm_user(BmUser::new("me@example.com").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::CredentialsMissing {
                field: "bm_password"
            })
        ));
    }

    #[test]
    fn test_business_user_requires_instance() {
        let result = OcapiConfig::builder()
            .environment(secret_source())
            .bm_user(BmUser::new("me@example.com").unwrap())
            .bm_password(BmPassword::new("pw").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::CredentialsMissing { field: "instance" })
        ));
    }

    #[test]
    fn test_invalid_source_values_are_rejected() {
        let env = CredentialSource::from_env_vars([
            ("OCAPI_CLIENT_ID", "id"),
            ("OCAPI_CLIENT_SECRET", "secret"),
            ("OCAPI_INSTANCE", "not-a-url"),
        ]);

        let result = OcapiConfig::builder().environment(env).build();
        assert!(matches!(result, Err(ConfigError::InvalidInstanceUrl { .. })));
    }

    #[test]
    fn test_config_debug_masks_secrets() {
        let config = OcapiConfig::builder()
            .environment(secret_source())
            .basic_auth(BasicAuth::new("storefront", "hunter2"))
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("OcapiConfig"));
        assert!(!debug_str.contains("env-secret"));
        assert!(!debug_str.contains("hunter2"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OcapiConfig>();
    }
}
