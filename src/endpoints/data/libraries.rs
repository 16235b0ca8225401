//! Content libraries.

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, Endpoint, EndpointBase};

/// The `libraries` resource.
#[derive(Clone, Debug)]
pub struct Libraries {
    base: EndpointBase,
}

impl Libraries {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "libraries";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Gets a content asset.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn get_content_asset(
        &self,
        library_id: &str,
        content_id: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self
            .base
            .url(Api::Data, Self::RESOURCE, &[library_id, "content", content_id]);
        self.base.http().get(&url, None, headers).await
    }

    /// Creates or replaces a content asset.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn put_content_asset(
        &self,
        library_id: &str,
        content_id: &str,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self
            .base
            .url(Api::Data, Self::RESOURCE, &[library_id, "content", content_id]);
        self.base.http().put(&url, Some(body.into()), headers).await
    }
}

impl Endpoint for Libraries {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "Libraries"
    }
}
