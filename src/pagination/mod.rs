//! Cursor-based pagination over paged search endpoints.
//!
//! A [`Paginator`] binds one [`PaginatedEndpoint`](crate::endpoints::PaginatedEndpoint)
//! operation and follows the `next` cursor of each page until it runs out.
//! POST searches carry the cursor as `next.start`, copied into the body's
//! `start`; GET searches carry it as a URL whose query replaces the call's
//! query parameters.
//!
//! # Consumption
//!
//! - [`Paginator::pages`]: raw pages
//! - [`Paginator::hits`]: hits of every page, flattened
//! - [`Paginator::search`]: a JMESPath expression applied per page
//! - [`Paginator::next_page`] / [`Paginator::next_hit`]: pull one at a time
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use salesforce_ocapi::endpoints::{CallArgs, Operation};
//! use salesforce_ocapi::Paginator;
//!
//! let args = CallArgs::new().param("q", "shoes").param("count", "200");
//! let mut paginator = Paginator::new(&product_search, Operation::Search, args, false)?;
//!
//! let mut ids = paginator.search("hits[].product_id")?;
//! while let Some(page_ids) = ids.next().await {
//!     println!("{}", page_ids?);
//! }
//! ```

mod errors;
mod paginator;
mod progress;
mod select;

pub use errors::PaginatorError;
pub use paginator::Paginator;
pub use progress::Progress;
pub use select::{normalize_select, parse_cursor_query, REQUIRED_FIELDS};
