//! System jobs: search index rebuilds and site archive import/export.
//!
//! These jobs run in the organization context, so the endpoint should use
//! the global site scope.

use serde_json::{json, Value};

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, Endpoint, EndpointBase};

const ACTIVE_DATA_FULL: &str = "sfcc-search-index-active-data-full-update";
const CONTENT_FULL: &str = "sfcc-search-index-content-full-update";
const PRODUCT_FULL: &str = "sfcc-search-index-product-full-update";
const ACTIVE_DATA_INCREMENTAL: &str = "sfcc-search-index-active-data-incremental-update";
const CONTENT_INCREMENTAL: &str = "sfcc-search-index-content-incremental-update";
const PRODUCT_INCREMENTAL: &str = "sfcc-search-index-product-incremental-update";
const SITE_ARCHIVE_EXPORT: &str = "sfcc-site-archive-export";
const SITE_ARCHIVE_IMPORT: &str = "sfcc-site-archive-import";

/// System jobs under the `jobs` resource.
///
/// # Example
///
/// ```rust,ignore
/// use salesforce_ocapi::endpoints::data::GlobalJobs;
///
/// let jobs = GlobalJobs::new(base);
/// jobs.site_archive_import("catalog-import.zip", None).await?;
/// ```
#[derive(Clone, Debug)]
pub struct GlobalJobs {
    base: EndpointBase,
}

impl GlobalJobs {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "jobs";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    async fn execute(
        &self,
        job_id: &str,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self
            .base
            .url(Api::Data, Self::RESOURCE, &[job_id, "executions"]);
        self.base
            .http()
            .post(&url, Some(body.into()), None, headers, false)
            .await
    }

    /// Rebuilds all active data search indexes for `site_scope`.
    ///
    /// `site_scope` is a JSON value such as `{"named_sites": ["RefArch"]}`
    /// or `"all_storefront_sites"`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn full_active_data_index_update(
        &self,
        site_scope: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        self.execute(ACTIVE_DATA_FULL, json!({ "site_scope": site_scope }), headers)
            .await
    }

    /// Rebuilds all content search indexes for `site_scope`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn full_content_index_update(
        &self,
        site_scope: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        self.execute(CONTENT_FULL, json!({ "site_scope": site_scope }), headers)
            .await
    }

    /// Rebuilds all product search indexes for `site_scope`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn full_product_index_update(
        &self,
        site_scope: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        self.execute(PRODUCT_FULL, json!({ "site_scope": site_scope }), headers)
            .await
    }

    /// Updates active data search indexes incrementally.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn incremental_active_data_index_update(
        &self,
        site_scope: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        self.execute(
            ACTIVE_DATA_INCREMENTAL,
            json!({ "site_scope": site_scope }),
            headers,
        )
        .await
    }

    /// Updates content search indexes incrementally.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn incremental_content_index_update(
        &self,
        site_scope: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        self.execute(
            CONTENT_INCREMENTAL,
            json!({ "site_scope": site_scope }),
            headers,
        )
        .await
    }

    /// Updates product search indexes incrementally.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn incremental_product_index_update(
        &self,
        site_scope: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        self.execute(
            PRODUCT_INCREMENTAL,
            json!({ "site_scope": site_scope }),
            headers,
        )
        .await
    }

    /// Exports data units to a site archive under `Impex/src`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn site_archive_export(
        &self,
        data_units: Value,
        file_path: &str,
        overwrite: bool,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let body = json!({
            "export_file": file_path,
            "data_units": data_units,
            "overwrite_export_file": overwrite,
        });
        self.execute(SITE_ARCHIVE_EXPORT, body, headers).await
    }

    /// Imports an uploaded site archive in `merge` mode.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn site_archive_import(
        &self,
        file_name: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let body = json!({ "file_name": file_name, "mode": "merge" });
        self.execute(SITE_ARCHIVE_IMPORT, body, headers).await
    }
}

impl Endpoint for GlobalJobs {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "GlobalJobs"
    }
}
