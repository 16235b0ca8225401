//! HTTP client types for OCAPI communication.
//!
//! This module provides the HTTP layer used by every endpoint. It handles
//! request preparation, authentication headers, timeout retries and
//! response decoding.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client
//! - [`HttpRequest`]: A request to be sent
//! - [`HttpResponse`]: A response with status, headers and body
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`RequestBody`]: JSON or XML request bodies
//! - [`RetryPolicy`]: Bounded retry for timed-out requests
//!
//! # Example
//!
//! ```rust,ignore
//! use salesforce_ocapi::clients::{HttpClient, HttpRequest, HttpMethod};
//! use serde_json::json;
//!
//! let request = HttpRequest::builder(HttpMethod::Post, url)
//!     .body(json!({"query": {"match_all_query": {}}}))
//!     .idempotent(true)
//!     .build()?;
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Only transport timeouts are retried; HTTP error statuses are returned as
//! responses. GET, PUT and DELETE requests, and POST or PATCH requests marked
//! idempotent, are retried up to 3 calls, waiting 1 second between calls.
//! The waits share a 10 second window that opens after the first call, so a
//! timed-out call does not use it up. Other requests fail immediately with
//! [`HttpError::IdempotentTimeout`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod retry;

pub use errors::{
    HttpError, HttpResponseError, IdempotentTimeoutError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{
    DataType, Headers, HttpMethod, HttpRequest, HttpRequestBuilder, QueryParams, RequestBody,
};
pub use http_response::HttpResponse;
pub use retry::{
    Attempt, RetryFailure, RetryPolicy, DEFAULT_MAX_CALLS, DEFAULT_RETRY_WINDOW, RETRY_WAIT_TIME,
};
