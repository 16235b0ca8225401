//! Site information.

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, Endpoint, EndpointBase};

/// The `site` resource.
#[derive(Clone, Debug)]
pub struct Site {
    base: EndpointBase,
}

impl Site {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "site";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Gets information about the site in scope: currencies, locales, status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn get_site_information(
        &self,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[]);
        self.base.http().get(&url, None, headers).await
    }
}

impl Endpoint for Site {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "Site"
    }
}
