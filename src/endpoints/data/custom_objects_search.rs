//! Custom object search.

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse, InvalidHttpRequestError};
use crate::endpoints::{Api, CallArgs, Endpoint, EndpointBase, Operation, PaginatedEndpoint};

/// The `custom_objects_search` resource.
///
/// Under a paginator the object type is the first path argument:
///
/// ```rust,ignore
/// let args = CallArgs::new()
///     .path_arg("NewsletterSubscription")
///     .body(json!({"query": {"match_all_query": {}}, "select": "(**)"}));
/// let paginator = Paginator::new(&search, Operation::SearchCustomObjects, args, false)?;
/// ```
#[derive(Clone, Debug)]
pub struct CustomObjectsSearch {
    base: EndpointBase,
}

impl CustomObjectsSearch {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "custom_objects_search";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Searches custom objects of `object_type`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn search(
        &self,
        object_type: &str,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Data, Self::RESOURCE, &[object_type]);
        self.base
            .http()
            .post(&url, Some(body.into()), None, headers, true)
            .await
    }
}

impl Endpoint for CustomObjectsSearch {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "CustomObjectsSearch"
    }
}

impl PaginatedEndpoint for CustomObjectsSearch {
    const OPERATIONS: &'static [Operation] = &[Operation::SearchCustomObjects];

    async fn invoke(
        &self,
        _operation: Operation,
        args: &CallArgs,
    ) -> Result<HttpResponse, HttpError> {
        let object_type = args
            .path_arg_at(0)
            .ok_or(InvalidHttpRequestError::MissingPathArgument {
                name: "object_type",
            })?;
        self.search(object_type, args.body_or_empty(), Some(&args.headers))
            .await
    }
}
