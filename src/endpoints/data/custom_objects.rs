//! Custom objects.

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, Endpoint, EndpointBase};

/// The `custom_objects` resource, addressed by object type and key.
#[derive(Clone, Debug)]
pub struct CustomObjects {
    base: EndpointBase,
}

impl CustomObjects {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "custom_objects";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    fn object_url(&self, object_type: &str, key: &str) -> String {
        self.base
            .url(Api::Data, Self::RESOURCE, &[object_type, key])
    }

    /// Gets a custom object.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn get_custom_object(
        &self,
        object_type: &str,
        key: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.object_url(object_type, key);
        self.base.http().get(&url, None, headers).await
    }

    /// Creates or replaces a custom object.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn put_custom_object(
        &self,
        object_type: &str,
        key: &str,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.object_url(object_type, key);
        self.base.http().put(&url, Some(body.into()), headers).await
    }

    /// Updates attributes of a custom object.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn patch_custom_object(
        &self,
        object_type: &str,
        key: &str,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.object_url(object_type, key);
        self.base
            .http()
            .patch(&url, Some(body.into()), headers, false)
            .await
    }

    /// Removes a custom object.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn delete_custom_object(
        &self,
        object_type: &str,
        key: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.object_url(object_type, key);
        self.base.http().delete(&url, headers).await
    }
}

impl Endpoint for CustomObjects {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "CustomObjects"
    }
}
