//! Customer lists.

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse, InvalidHttpRequestError};
use crate::endpoints::{Api, CallArgs, Endpoint, EndpointBase, Operation, PaginatedEndpoint};

/// The `customer_lists` resource.
///
/// Under a paginator the customer list ID is the first path argument.
#[derive(Clone, Debug)]
pub struct CustomerLists {
    base: EndpointBase,
}

impl CustomerLists {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "customer_lists";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Searches customers in a customer list.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn customer_search(
        &self,
        customer_list_id: &str,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(
            Api::Data,
            Self::RESOURCE,
            &[customer_list_id, "customer_search"],
        );
        self.base
            .http()
            .post(&url, Some(body.into()), None, headers, true)
            .await
    }
}

impl Endpoint for CustomerLists {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "CustomerLists"
    }
}

impl PaginatedEndpoint for CustomerLists {
    const OPERATIONS: &'static [Operation] = &[Operation::CustomerSearch];

    async fn invoke(
        &self,
        _operation: Operation,
        args: &CallArgs,
    ) -> Result<HttpResponse, HttpError> {
        let list_id = args
            .path_arg_at(0)
            .ok_or(InvalidHttpRequestError::MissingPathArgument {
                name: "customer_list_id",
            })?;
        self.customer_search(list_id, args.body_or_empty(), Some(&args.headers))
            .await
    }
}
