//! Code versions.

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, Endpoint, EndpointBase};

/// The `code_versions` resource.
#[derive(Clone, Debug)]
pub struct CodeVersions {
    base: EndpointBase,
}

impl CodeVersions {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "code_versions";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Lists all code versions.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn get_code_versions(
        &self,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Data, Self::RESOURCE, &[]);
        self.base.http().get(&url, None, headers).await
    }

    /// Gets one code version.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn get_code_version(
        &self,
        code_version_id: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Data, Self::RESOURCE, &[code_version_id]);
        self.base.http().get(&url, None, headers).await
    }

    /// Creates a code version.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn put_code_version(
        &self,
        code_version_id: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Data, Self::RESOURCE, &[code_version_id]);
        self.base.http().put(&url, None, headers).await
    }

    /// Updates a code version, e.g. `{"active": true}` to activate it.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn patch_code_version(
        &self,
        code_version_id: &str,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Data, Self::RESOURCE, &[code_version_id]);
        self.base
            .http()
            .patch(&url, Some(body.into()), headers, false)
            .await
    }

    /// Removes a code version.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn delete_code_version(
        &self,
        code_version_id: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Data, Self::RESOURCE, &[code_version_id]);
        self.base.http().delete(&url, headers).await
    }
}

impl Endpoint for CodeVersions {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "CodeVersions"
    }
}
