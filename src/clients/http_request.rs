//! HTTP request types for the OCAPI SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder. A request
//! is a plain description; the [`HttpClient`](crate::HttpClient) runs it
//! through the preparation pipeline (content type, then authorization)
//! before dispatch.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// Request headers keyed by name.
pub type Headers = HashMap<String, String>;

/// Ordered query parameters.
pub type QueryParams = Vec<(String, String)>;

/// HTTP methods used by OCAPI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and searches.
    Post,
    /// HTTP PUT method for creating or replacing resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that may always be retried after a timeout.
    #[must_use]
    pub const fn is_idempotent(self) -> bool {
        matches!(self, Self::Get | Self::Put | Self::Delete)
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    Json,
    /// XML content type (`application/xml`).
    Xml,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }
}

/// A request body.
///
/// Structured values are sent as JSON. Strings are only accepted when they
/// are XML documents, i.e. start with `<`.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON document.
    Json(Value),
    /// A pre-encoded document.
    Raw(String),
}

impl RequestBody {
    /// Infers the content type of this body.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::UnsupportedBody`] for a string body
    /// that does not start with `<`.
    pub fn data_type(&self) -> Result<DataType, InvalidHttpRequestError> {
        match self {
            Self::Json(_) => Ok(DataType::Json),
            Self::Raw(text) if text.starts_with('<') => Ok(DataType::Xml),
            Self::Raw(text) => Err(InvalidHttpRequestError::UnsupportedBody {
                preview: text.chars().take(40).collect(),
            }),
        }
    }

    /// Returns the wire form of this body.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Raw(text) => text.clone(),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

/// An HTTP request to be sent to OCAPI.
///
/// Use [`HttpRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let search = HttpRequest::builder(HttpMethod::Post, "https://example.com/s/-/dw/shop/v20_4/order_search")
///     .body(json!({"query": {"match_all_query": {}}}))
///     .idempotent(true)
///     .build()
///     .unwrap();
///
/// assert!(search.retries_on_timeout());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL for this request.
    pub url: String,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Query parameters to append to the URL.
    pub query: QueryParams,
    /// Caller headers. These override the bearer token but not basic auth.
    pub headers: Headers,
    /// Marks a POST or PATCH as safe to retry after a timeout.
    pub idempotent: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::UnsupportedBody`] if the body is a
    /// string that is not XML.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if let Some(body) = &self.body {
            body.data_type()?;
        }
        Ok(())
    }

    /// Returns `true` if a timeout may be followed by another attempt.
    ///
    /// GET, PUT and DELETE always qualify; POST and PATCH only when marked
    /// idempotent.
    #[must_use]
    pub const fn retries_on_timeout(&self) -> bool {
        self.idempotent || self.http_method.is_idempotent()
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Option<RequestBody>,
    query: QueryParams,
    headers: Headers,
    idempotent: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: None,
            query: Vec::new(),
            headers: HashMap::new(),
            idempotent: false,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets an optional request body.
    #[must_use]
    pub fn maybe_body(mut self, body: Option<RequestBody>) -> Self {
        self.body = body;
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Merges headers into the request.
    #[must_use]
    pub fn headers(mut self, headers: &Headers) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Marks a POST or PATCH as safe to retry after a timeout.
    #[must_use]
    pub const fn idempotent(mut self, idempotent: bool) -> Self {
        self.idempotent = idempotent;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            query: self.query,
            headers: self.headers,
            idempotent: self.idempotent,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_idempotent_methods() {
        assert!(HttpMethod::Get.is_idempotent());
        assert!(HttpMethod::Put.is_idempotent());
        assert!(HttpMethod::Delete.is_idempotent());
        assert!(!HttpMethod::Post.is_idempotent());
        assert!(!HttpMethod::Patch.is_idempotent());
    }

    #[test]
    fn test_post_retries_only_when_marked() {
        let plain = HttpRequest::builder(HttpMethod::Post, "https://example.com")
            .build()
            .unwrap();
        let marked = HttpRequest::builder(HttpMethod::Post, "https://example.com")
            .idempotent(true)
            .build()
            .unwrap();

        assert!(!plain.retries_on_timeout());
        assert!(marked.retries_on_timeout());
    }

    #[test]
    fn test_body_content_type_inference() {
        assert_eq!(
            RequestBody::from(json!({"a": 1})).data_type().unwrap(),
            DataType::Json
        );
        assert_eq!(
            RequestBody::from("<catalog/>").data_type().unwrap(),
            DataType::Xml
        );
        assert!(matches!(
            RequestBody::from("plain").data_type(),
            Err(InvalidHttpRequestError::UnsupportedBody { .. })
        ));
    }

    #[test]
    fn test_build_rejects_non_xml_string_body() {
        let result = HttpRequest::builder(HttpMethod::Put, "https://example.com")
            .body("not xml")
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::UnsupportedBody { preview }) if preview == "not xml"
        ));
    }

    #[test]
    fn test_json_body_encoding() {
        let body = RequestBody::from(json!({"count": 200}));
        assert_eq!(body.encode(), r#"{"count":200}"#);
    }

    #[test]
    fn test_builder_collects_query_and_headers() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://example.com")
            .query_param("q", "shoes")
            .query_param("start", "0")
            .header("x-dw-client-id", "abc")
            .build()
            .unwrap();

        assert_eq!(
            request.query,
            vec![
                ("q".to_string(), "shoes".to_string()),
                ("start".to_string(), "0".to_string())
            ]
        );
        assert_eq!(request.headers.get("x-dw-client-id").map(String::as_str), Some("abc"));
    }
}
