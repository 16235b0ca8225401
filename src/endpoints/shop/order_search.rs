//! Order search.
//!
//! <https://documentation.b2c.commercecloud.salesforce.com/DOC1/topic/com.demandware.dochelp/OCAPI/current/shop/Resources/OrderSearch.html>

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, CallArgs, Endpoint, EndpointBase, Operation, PaginatedEndpoint};

/// The `order_search` resource.
///
/// Searches are POSTs that change nothing, so they are retried on timeout.
///
/// # Example
///
/// ```rust,ignore
/// use salesforce_ocapi::endpoints::shop::OrderSearch;
/// use serde_json::json;
///
/// let search = OrderSearch::new(base);
/// let response = search
///     .search(
///         json!({
///             "query": {"term_query": {"fields": ["status"], "operator": "is", "values": ["new"]}},
///             "select": "(hits.(data.(order_no)),total)"
///         }),
///         None,
///     )
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct OrderSearch {
    base: EndpointBase,
}

impl OrderSearch {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "order_search";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Runs an order search query.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn search(
        &self,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[]);
        self.base
            .http()
            .post(&url, Some(body.into()), None, headers, true)
            .await
    }
}

impl Endpoint for OrderSearch {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "OrderSearch"
    }
}

impl PaginatedEndpoint for OrderSearch {
    const OPERATIONS: &'static [Operation] = &[Operation::Search];

    async fn invoke(
        &self,
        _operation: Operation,
        args: &CallArgs,
    ) -> Result<HttpResponse, HttpError> {
        self.search(args.body_or_empty(), Some(&args.headers)).await
    }
}
