//! Product search.
//!
//! <https://documentation.b2c.commercecloud.salesforce.com/DOC1/topic/com.demandware.dochelp/OCAPI/current/shop/Resources/ProductSearch.html>

use crate::clients::{Headers, HttpError, HttpResponse, QueryParams};
use crate::endpoints::{Api, CallArgs, Endpoint, EndpointBase, Operation, PaginatedEndpoint};

/// Header carrying the API client ID on Shop API requests.
pub const CLIENT_ID_HEADER: &str = "x-dw-client-id";

/// The `product_search` resource.
///
/// Searches are GETs with query parameters. The next page is addressed by
/// the `next` URL in each response.
#[derive(Clone, Debug)]
pub struct ProductSearch {
    base: EndpointBase,
}

impl ProductSearch {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "product_search";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Searches products, e.g. with `q`, `refine` and `count` parameters.
    ///
    /// The `x-dw-client-id` header is added from the configured client ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn search(
        &self,
        params: QueryParams,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let mut headers = headers.cloned().unwrap_or_default();
        headers.insert(
            CLIENT_ID_HEADER.to_string(),
            self.base.http().provider().client_id().as_ref().to_string(),
        );

        let url = self.base.url(Api::Shop, Self::RESOURCE, &[]);
        self.base.http().get(&url, Some(params), Some(&headers)).await
    }
}

impl Endpoint for ProductSearch {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "ProductSearch"
    }
}

impl PaginatedEndpoint for ProductSearch {
    const OPERATIONS: &'static [Operation] = &[Operation::Search];

    async fn invoke(
        &self,
        _operation: Operation,
        args: &CallArgs,
    ) -> Result<HttpResponse, HttpError> {
        self.search(args.params.clone(), Some(&args.headers)).await
    }
}
