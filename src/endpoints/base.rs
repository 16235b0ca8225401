//! Shared endpoint context and URL construction.

use std::fmt;

use crate::clients::HttpClient;
use crate::config::{ApiVersion, InstanceUrl, SiteId};
use crate::error::ConfigError;

/// The OCAPI family an endpoint belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Api {
    /// The Shop API, `/dw/shop/…`.
    Shop,
    /// The Data API, `/dw/data/…`.
    Data,
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shop => f.write_str("shop"),
            Self::Data => f.write_str("data"),
        }
    }
}

/// Context shared by all endpoints: the HTTP client, the target instance,
/// the site scope and the API version.
///
/// The instance defaults to the token provider's instance and the site to
/// the organization scope `-`.
///
/// # Example
///
/// ```rust,ignore
/// use salesforce_ocapi::endpoints::{Api, EndpointBase};
/// use salesforce_ocapi::SiteId;
///
/// let base = EndpointBase::new(http)?.with_site(SiteId::new("RefArch")?);
/// assert_eq!(
///     base.url(Api::Shop, "orders", &["00001234", "notes"]),
///     "https://dev01.example.com/s/RefArch/dw/shop/v20_4/orders/00001234/notes",
/// );
/// ```
#[derive(Clone, Debug)]
pub struct EndpointBase {
    http: HttpClient,
    instance: InstanceUrl,
    site: SiteId,
    api_version: ApiVersion,
}

impl EndpointBase {
    /// Creates a base targeting the token provider's instance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialsMissing`] for `instance` if the
    /// configuration has no instance URL.
    pub fn new(http: HttpClient) -> Result<Self, ConfigError> {
        let instance = http
            .provider()
            .instance()
            .cloned()
            .ok_or(ConfigError::CredentialsMissing { field: "instance" })?;
        Ok(Self::with_instance(http, instance))
    }

    /// Creates a base targeting an explicit instance.
    #[must_use]
    pub fn with_instance(http: HttpClient, instance: InstanceUrl) -> Self {
        let api_version = http.provider().config().api_version().clone();
        Self {
            http,
            instance,
            site: SiteId::default(),
            api_version,
        }
    }

    /// Sets the site scope.
    #[must_use]
    pub fn with_site(mut self, site: SiteId) -> Self {
        self.site = site;
        self
    }

    /// Overrides the API version.
    #[must_use]
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = version;
        self
    }

    /// Returns the HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the target instance.
    #[must_use]
    pub const fn instance(&self) -> &InstanceUrl {
        &self.instance
    }

    /// Returns the site scope.
    #[must_use]
    pub const fn site(&self) -> &SiteId {
        &self.site
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Builds `{instance}/s/{site}/dw/{api}/{version}/{resource}[/{segment}…]`.
    ///
    /// Segments are percent-encoded.
    #[must_use]
    pub fn url(&self, api: Api, resource: &str, segments: &[&str]) -> String {
        let mut url = format!(
            "{}/s/{}/dw/{api}/{}/{resource}",
            self.instance,
            self.site.as_ref(),
            self.api_version
        );
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenProvider;
    use crate::config::{ClientId, ClientSecret, OcapiConfig};
    use std::sync::Arc;

    fn http(instance: Option<&str>) -> HttpClient {
        let mut builder = OcapiConfig::builder()
            .client_id(ClientId::new("id").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap());
        if let Some(instance) = instance {
            builder = builder.instance(InstanceUrl::new(instance).unwrap());
        }
        let provider = TokenProvider::new(builder.build().unwrap()).unwrap();
        HttpClient::new(Arc::new(provider)).unwrap()
    }

    #[test]
    fn test_missing_instance_is_a_config_error() {
        assert!(matches!(
            EndpointBase::new(http(None)),
            Err(ConfigError::CredentialsMissing { field: "instance" })
        ));
    }

    #[test]
    fn test_url_defaults_to_global_site() {
        let base = EndpointBase::new(http(Some("https://dev01.example.com/"))).unwrap();
        assert_eq!(
            base.url(Api::Data, "code_versions", &[]),
            "https://dev01.example.com/s/-/dw/data/v20_4/code_versions"
        );
    }

    #[test]
    fn test_url_with_site_and_segments() {
        let base = EndpointBase::new(http(Some("https://dev01.example.com")))
            .unwrap()
            .with_site(SiteId::new("RefArch").unwrap());
        assert_eq!(
            base.url(Api::Shop, "orders", &["00001234", "notes"]),
            "https://dev01.example.com/s/RefArch/dw/shop/v20_4/orders/00001234/notes"
        );
    }

    #[test]
    fn test_instance_override_and_segment_encoding() {
        let base = EndpointBase::with_instance(
            http(None),
            InstanceUrl::new("https://staging.example.com").unwrap(),
        )
        .with_api_version(ApiVersion::V19_10);
        assert_eq!(
            base.url(Api::Data, "custom_objects", &["MyType", "a key"]),
            "https://staging.example.com/s/-/dw/data/v19_10/custom_objects/MyType/a%20key"
        );
    }
}
