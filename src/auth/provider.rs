//! OAuth2 token provider for OCAPI.
//!
//! The [`TokenProvider`] obtains access tokens with one of two grants and
//! renews them shortly before they expire:
//!
//! - **Client credentials**: `POST {account_host}/dw/oauth2/access_token`
//!   with basic auth `client_id:client_secret`.
//! - **Business Manager user**: `POST {instance}/dw/oauth2/access_token?client_id=…`
//!   with basic auth `bm_user:{bm_password}:{client_secret}`.
//!
//! # Example
//!
//! ```rust,ignore
//! use salesforce_ocapi::{OcapiConfig, TokenProvider, CredentialSource};
//!
//! let config = OcapiConfig::builder()
//!     .environment(CredentialSource::from_env())
//!     .build()?;
//!
//! let provider = TokenProvider::connect(config).await?;
//! let (name, value) = ("Authorization", provider.auth_header().await?);
//! ```

use std::fmt;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::auth::error::AuthError;
use crate::auth::token::Token;
use crate::config::{ClientId, InstanceUrl, OcapiConfig};

/// Grant type for client credentials.
pub const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Grant type for Business Manager user impersonation.
pub const BM_USER_GRANT_TYPE: &str =
    "urn:demandware:params:oauth:grant-type:client-id:dwsid:dwsecuretoken";

/// Path of the token endpoint on both hosts.
const TOKEN_PATH: &str = "/dw/oauth2/access_token";

/// The grant a provider uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grant {
    /// Client credentials against Account Manager.
    ClientCredentials,
    /// Business Manager user impersonation against the instance.
    BusinessManager,
}

/// Obtains and renews OCAPI access tokens.
///
/// The provider holds at most one token. Every accessor first checks the
/// token's expiry and fetches a new one when needed; the check and fetch run
/// under an async mutex, so one provider can be shared by many tasks and a
/// renewal happens once.
///
/// # Thread Safety
///
/// `TokenProvider` is `Send + Sync`. Share it with `Arc`.
pub struct TokenProvider {
    config: OcapiConfig,
    client: reqwest::Client,
    token: Mutex<Option<Token>>,
}

// Verify TokenProvider is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenProvider>();
};

impl TokenProvider {
    /// Creates a provider without contacting the token endpoint.
    ///
    /// The first token is fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Network`] if the HTTP client cannot be created.
    pub fn new(config: OcapiConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            config,
            client,
            token: Mutex::new(None),
        })
    }

    /// Creates a provider and fetches the first token.
    ///
    /// # Errors
    ///
    /// Returns any error from [`TokenProvider::fetch_token`].
    pub async fn connect(config: OcapiConfig) -> Result<Self, AuthError> {
        let provider = Self::new(config)?;
        provider.fetch_token().await?;
        Ok(provider)
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &OcapiConfig {
        &self.config
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        self.config.client_id()
    }

    /// Returns the instance URL, if configured.
    #[must_use]
    pub const fn instance(&self) -> Option<&InstanceUrl> {
        self.config.instance()
    }

    /// Returns the grant this provider uses.
    #[must_use]
    pub const fn grant(&self) -> Grant {
        if self.config.is_business_manager_grant() {
            Grant::BusinessManager
        } else {
            Grant::ClientCredentials
        }
    }

    /// Fetches a new token unconditionally and stores it.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AuthenticationFailure`] if the credentials are rejected
    /// - [`AuthError::UnrecognizedAuthResponse`] for any other failure response
    /// - [`AuthError::Network`] if the request cannot be completed
    pub async fn fetch_token(&self) -> Result<Token, AuthError> {
        let mut guard = self.token.lock().await;
        let token = self.request_token().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Fetches a new token if none is held or the held one has expired.
    ///
    /// # Errors
    ///
    /// See [`TokenProvider::fetch_token`].
    pub async fn ensure_fresh(&self) -> Result<(), AuthError> {
        self.fresh_token().await.map(|_| ())
    }

    /// Returns the `Authorization` header value, `Bearer <token>`.
    ///
    /// # Errors
    ///
    /// See [`TokenProvider::fetch_token`].
    pub async fn auth_header(&self) -> Result<String, AuthError> {
        Ok(self.fresh_token().await?.authorization_value())
    }

    /// Returns the bare access token.
    ///
    /// # Errors
    ///
    /// See [`TokenProvider::fetch_token`].
    pub async fn raw_token(&self) -> Result<String, AuthError> {
        Ok(self.fresh_token().await?.access_token)
    }

    /// Returns the full token record.
    ///
    /// # Errors
    ///
    /// See [`TokenProvider::fetch_token`].
    pub async fn token_record(&self) -> Result<Token, AuthError> {
        self.fresh_token().await
    }

    async fn fresh_token(&self) -> Result<Token, AuthError> {
        let mut guard = self.token.lock().await;
        match guard.as_ref() {
            Some(token) if !token.is_expired() => Ok(token.clone()),
            _ => {
                let token = self.request_token().await?;
                *guard = Some(token.clone());
                Ok(token)
            }
        }
    }

    async fn request_token(&self) -> Result<Token, AuthError> {
        tracing::info!(grant = ?self.grant(), "Fetching OCAPI access token");

        let client_id = self.config.client_id().as_ref();
        let client_secret = self.config.client_secret().as_ref();

        let request = match (self.config.business_user(), self.config.instance()) {
            (Some(business_user), Some(instance)) => {
                let url = format!(
                    "{instance}{TOKEN_PATH}?client_id={}",
                    urlencoding::encode(client_id)
                );
                self.client
                    .post(url)
                    .basic_auth(
                        business_user.user.as_ref(),
                        Some(format!(
                            "{}:{client_secret}",
                            business_user.password.as_ref()
                        )),
                    )
                    .form(&[("grant_type", BM_USER_GRANT_TYPE)])
            }
            _ => {
                let url = format!("{}{TOKEN_PATH}", self.config.account_manager_host());
                self.client
                    .post(url)
                    .basic_auth(client_id, Some(client_secret))
                    .form(&[("grant_type", CLIENT_CREDENTIALS_GRANT_TYPE)])
            }
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let issued_at = Utc::now().timestamp();

        let result = Token::from_response(status, &body, issued_at);
        if let Err(error) = &result {
            tracing::warn!(status, %error, "Token request failed");
        }
        result
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_id", self.config.client_id())
            .field("grant", &self.grant())
            .finish_non_exhaustive()
    }
}
