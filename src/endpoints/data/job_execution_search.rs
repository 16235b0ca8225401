//! Job execution search.

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, CallArgs, Endpoint, EndpointBase, Operation, PaginatedEndpoint};

/// The `job_execution_search` resource.
#[derive(Clone, Debug)]
pub struct JobExecutionSearch {
    base: EndpointBase,
}

impl JobExecutionSearch {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "job_execution_search";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Searches job executions, e.g. by `job_id` and `status`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn search(
        &self,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Data, Self::RESOURCE, &[]);
        self.base
            .http()
            .post(&url, Some(body.into()), None, headers, true)
            .await
    }
}

impl Endpoint for JobExecutionSearch {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "JobExecutionSearch"
    }
}

impl PaginatedEndpoint for JobExecutionSearch {
    const OPERATIONS: &'static [Operation] = &[Operation::Search];

    async fn invoke(
        &self,
        _operation: Operation,
        args: &CallArgs,
    ) -> Result<HttpResponse, HttpError> {
        self.search(args.body_or_empty(), Some(&args.headers)).await
    }
}
