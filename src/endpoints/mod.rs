//! OCAPI endpoint types.
//!
//! Every endpoint is a thin mapping from a method call to a URL and an HTTP
//! verb over a shared [`EndpointBase`]. Endpoints whose operations return
//! paged search results also implement [`PaginatedEndpoint`] so they can be
//! driven by a [`Paginator`](crate::Paginator).
//!
//! # Overview
//!
//! - [`EndpointBase`]: Binds the HTTP client, instance, site and API version
//! - [`Endpoint`]: The capability every endpoint exposes
//! - [`PaginatedEndpoint`]: Endpoints with paged search operations
//! - [`Operation`]: Tags naming a paged operation
//! - [`CallArgs`]: Arguments forwarded to a paged operation
//! - [`shop`]: Shop API endpoints
//! - [`data`]: Data API endpoints
//!
//! # Example
//!
//! ```rust,ignore
//! use salesforce_ocapi::endpoints::{EndpointBase, shop::OrderSearch};
//! use salesforce_ocapi::SiteId;
//! use serde_json::json;
//!
//! let base = EndpointBase::new(http)?.with_site(SiteId::new("SiteGenesis")?);
//! let orders = OrderSearch::new(base);
//! let response = orders
//!     .search(json!({"query": {"match_all_query": {}}, "select": "(**)"}), None)
//!     .await?;
//! ```

mod base;
pub mod data;
mod operation;
pub mod shop;

pub use base::{Api, EndpointBase};
pub use operation::{CallArgs, Operation, UnknownOperation};

use std::future::Future;

use crate::clients::{HttpError, HttpResponse};

/// The capability shared by all OCAPI endpoints.
pub trait Endpoint {
    /// Returns the shared endpoint context.
    fn base(&self) -> &EndpointBase;

    /// Returns the resource path segment, e.g. `order_search`.
    fn resource(&self) -> &str;

    /// Returns the endpoint type name used in error messages.
    fn name(&self) -> &'static str;
}

/// An endpoint with operations that return paged search results.
///
/// A page is a JSON document with `hits`, `total` and an optional `next`
/// cursor.
pub trait PaginatedEndpoint: Endpoint {
    /// Operations this endpoint can run under a paginator.
    const OPERATIONS: &'static [Operation];

    /// Returns `true` if `operation` can be run by [`invoke`](Self::invoke).
    fn supports(&self, operation: Operation) -> bool {
        Self::OPERATIONS.contains(&operation)
    }

    /// Runs one call of `operation` with `args`.
    ///
    /// Only called with operations for which [`supports`](Self::supports)
    /// returns `true`.
    fn invoke(
        &self,
        operation: Operation,
        args: &CallArgs,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>>;
}
