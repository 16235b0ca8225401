//! Job executions.

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, Endpoint, EndpointBase};

/// The `jobs` resource.
#[derive(Clone, Debug)]
pub struct Jobs {
    base: EndpointBase,
}

impl Jobs {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "jobs";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Gets the status of one job execution.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn get_job_execution(
        &self,
        job_id: &str,
        execution_id: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self
            .base
            .url(Api::Data, Self::RESOURCE, &[job_id, "executions", execution_id]);
        self.base.http().get(&url, None, headers).await
    }

    /// Removes a job execution record.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn delete_job_execution(
        &self,
        job_id: &str,
        execution_id: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self
            .base
            .url(Api::Data, Self::RESOURCE, &[job_id, "executions", execution_id]);
        self.base.http().delete(&url, headers).await
    }

    /// Starts a job. Job parameters, if any, go in `body`.
    ///
    /// Not retried on timeout: the job may already be running.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn execute_job(
        &self,
        job_id: &str,
        body: Option<Value>,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self
            .base
            .url(Api::Data, Self::RESOURCE, &[job_id, "executions"]);
        self.base
            .http()
            .post(&url, body.map(Into::into), None, headers, false)
            .await
    }
}

impl Endpoint for Jobs {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "Jobs"
    }
}
