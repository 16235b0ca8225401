//! Baskets.

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, Endpoint, EndpointBase};

/// The `baskets` resource.
#[derive(Clone, Debug)]
pub struct Baskets {
    base: EndpointBase,
}

impl Baskets {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "baskets";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Creates a basket, optionally pre-filled with `body`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn create_basket(
        &self,
        body: Option<Value>,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[]);
        self.base
            .http()
            .post(&url, body.map(Into::into), None, headers, false)
            .await
    }

    /// Gets a basket.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn get_basket(
        &self,
        basket_id: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[basket_id]);
        self.base.http().get(&url, None, headers).await
    }

    /// Updates a basket.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn modify_basket(
        &self,
        basket_id: &str,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[basket_id]);
        self.base
            .http()
            .patch(&url, Some(body.into()), headers, false)
            .await
    }

    /// Removes a basket.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn delete_basket(
        &self,
        basket_id: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[basket_id]);
        self.base.http().delete(&url, headers).await
    }
}

impl Endpoint for Baskets {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "Baskets"
    }
}
