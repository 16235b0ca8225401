//! # Salesforce OCAPI Rust SDK
//!
//! A Rust SDK for the Salesforce Commerce Cloud Open Commerce API (OCAPI),
//! covering the Shop and Data APIs, OAuth2 token handling, cursor-based
//! pagination and WebDAV file transfer.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Configuration via [`OcapiConfig`] and [`OcapiConfigBuilder`], resolving
//!   credentials from explicit values, the environment, or a profile file
//! - Validated newtypes for credentials, instance URLs and API versions
//! - A [`TokenProvider`] for the client credentials and Business Manager
//!   user grants, renewing tokens shortly before they expire
//! - An async [`HttpClient`] that injects authorization and content type
//!   headers and retries timed-out idempotent requests
//! - Shop and Data API endpoints under [`endpoints`]
//! - A [`Paginator`] that follows search result cursors to the end
//! - A WebDAV client under [`webdav`]
//!
//! ## Quick Start
//!
//! ```rust
//! use salesforce_ocapi::{ClientId, ClientSecret, InstanceUrl, OcapiConfig};
//!
//! let config = OcapiConfig::builder()
//!     .client_id(ClientId::new("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap())
//!     .client_secret(ClientSecret::new("secret").unwrap())
//!     .instance(InstanceUrl::new("https://dev01-eu01-example.demandware.net").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.is_business_manager_grant());
//! ```
//!
//! ## Credentials From The Environment Or A Profile
//!
//! ```rust,ignore
//! use salesforce_ocapi::{CredentialSource, OcapiConfig};
//!
//! // OCAPI_CLIENT_ID, OCAPI_CLIENT_SECRET, OCAPI_INSTANCE, ... win over
//! // the [default] section of ~/.sfcc/credentials.
//! let config = OcapiConfig::builder()
//!     .environment(CredentialSource::from_env())
//!     .profile(CredentialSource::from_default_profile("default")?)
//!     .build()?;
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use salesforce_ocapi::endpoints::{data::CodeVersions, EndpointBase};
//! use salesforce_ocapi::{HttpClient, TokenProvider};
//!
//! let provider = Arc::new(TokenProvider::connect(config).await?);
//! let http = HttpClient::new(provider)?;
//! let code_versions = CodeVersions::new(EndpointBase::new(http)?);
//!
//! let response = code_versions.get_code_versions(None).await?;
//! println!("{}", response.json_value()?);
//! ```
//!
//! ## Paginating A Search
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use salesforce_ocapi::endpoints::{shop::OrderSearch, CallArgs, Operation};
//! use salesforce_ocapi::Paginator;
//! use serde_json::json;
//!
//! let order_search = OrderSearch::new(base);
//! let args = CallArgs::new().body(json!({
//!     "query": {"term_query": {"fields": ["status"], "type": "is", "values": ["failed"]}},
//!     "select": "(hits.(data.(order_no)))",
//! }));
//!
//! let mut paginator = Paginator::new(&order_search, Operation::Search, args, true)?;
//! let mut pages = paginator.search("hits[].data.order_no")?;
//! while let Some(order_numbers) = pages.next().await {
//!     println!("{}", order_numbers?);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is resolved once and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Configuration, token provider and clients are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **Logging via `tracing`**: The SDK emits events but installs no subscriber

pub mod auth;
pub mod clients;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod pagination;
pub mod webdav;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, Grant, Token, TokenProvider};
pub use config::{
    ApiVersion, BasicAuth, BmPassword, BmUser, BusinessUser, ClientId, ClientSecret,
    CredentialSource, InstanceUrl, OcapiConfig, OcapiConfigBuilder, SiteId,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, IdempotentTimeoutError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError, RequestBody, RetryPolicy,
};

// Re-export pagination types
pub use pagination::{Paginator, PaginatorError, Progress};

pub use webdav::{RemoteFileSystem, WebDavClient, WebDavError};
