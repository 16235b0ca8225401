//! HTTP client for OCAPI communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests with timeout retry handling.

use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::auth::{AuthError, TokenProvider};
use crate::clients::errors::{
    HttpError, IdempotentTimeoutError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
use crate::clients::http_request::{
    Headers, HttpMethod, HttpRequest, QueryParams, RequestBody,
};
use crate::clients::http_response::HttpResponse;
use crate::clients::retry::{Attempt, RetryFailure, RetryPolicy};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to OCAPI.
///
/// Every request passes through a fixed preparation pipeline before
/// dispatch:
///
/// 1. **Content type**: a JSON body sets `Content-Type: application/json`, a
///    string body starting with `<` sets `application/xml`, and any other
///    string body is rejected.
/// 2. **Authorization**: the bearer token from the [`TokenProvider`] is the
///    base layer, caller headers override it, and configured basic auth
///    replaces `Authorization` last.
///
/// Timeouts are retried per the [`RetryPolicy`] for GET, PUT and DELETE and
/// for POST or PATCH requests marked idempotent. Any other timed-out request
/// fails with [`HttpError::IdempotentTimeout`]. Non-2xx statuses are returned
/// as ordinary responses.
///
/// # Thread Safety
///
/// `HttpClient` is `Clone`, `Send` and `Sync`. Clones share the token
/// provider and connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use salesforce_ocapi::{HttpClient, OcapiConfig, TokenProvider};
///
/// let provider = Arc::new(TokenProvider::connect(config).await?);
/// let client = HttpClient::new(provider)?;
///
/// let response = client
///     .get("https://dev01.example.com/s/-/dw/data/v20_4/code_versions", None, None)
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    provider: Arc<TokenProvider>,
    retry_policy: RetryPolicy,
    basic_auth: Option<String>,
    default_headers: Headers,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

/// A request after the preparation pipeline, ready to dispatch.
#[derive(Debug)]
struct PreparedRequest {
    method: HttpMethod,
    url: String,
    query: QueryParams,
    headers: Headers,
    body: Option<String>,
}

impl HttpClient {
    /// Creates a new HTTP client sharing `provider`.
    ///
    /// Timeout, retry policy, basic auth and user agent prefix are taken
    /// from the provider's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created.
    pub fn new(provider: Arc<TokenProvider>) -> Result<Self, HttpError> {
        let config = provider.config();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Salesforce OCAPI Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let basic_auth = config.basic_auth().map(|auth| {
            let credentials = STANDARD.encode(format!("{}:{}", auth.user(), auth.password()));
            format!("Basic {credentials}")
        });

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            retry_policy: *config.retry_policy(),
            provider,
            basic_auth,
            default_headers,
        })
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the token provider shared by this client.
    #[must_use]
    pub const fn provider(&self) -> &Arc<TokenProvider> {
        &self.provider
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(
        &self,
        url: &str,
        query: Option<QueryParams>,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, url)
            .query(query.unwrap_or_default())
            .headers(headers.unwrap_or(&HashMap::new()))
            .build()?;
        self.request(request).await
    }

    /// Sends a POST request. Pass `idempotent = true` for searches and other
    /// POSTs that are safe to repeat after a timeout.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(
        &self,
        url: &str,
        body: Option<RequestBody>,
        query: Option<QueryParams>,
        headers: Option<&Headers>,
        idempotent: bool,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .maybe_body(body)
            .query(query.unwrap_or_default())
            .headers(headers.unwrap_or(&HashMap::new()))
            .idempotent(idempotent)
            .build()?;
        self.request(request).await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put(
        &self,
        url: &str,
        body: Option<RequestBody>,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, url)
            .maybe_body(body)
            .headers(headers.unwrap_or(&HashMap::new()))
            .build()?;
        self.request(request).await
    }

    /// Sends a PATCH request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn patch(
        &self,
        url: &str,
        body: Option<RequestBody>,
        headers: Option<&Headers>,
        idempotent: bool,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Patch, url)
            .maybe_body(body)
            .headers(headers.unwrap_or(&HashMap::new()))
            .idempotent(idempotent)
            .build()?;
        self.request(request).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(
        &self,
        url: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, url)
            .headers(headers.unwrap_or(&HashMap::new()))
            .build()?;
        self.request(request).await
    }

    /// Sends an HTTP request.
    ///
    /// This method handles:
    /// - Request validation
    /// - The preparation pipeline (content type, then authorization)
    /// - Timeout retries for idempotent requests
    ///
    /// The token is refreshed, if needed, before every attempt.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A token cannot be obtained (`Auth`)
    /// - A non-idempotent request times out (`IdempotentTimeout`)
    /// - Every allowed attempt times out (`MaxRetries`)
    /// - Any other transport error occurs (`Network`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let request = &request;
        let retry_on_timeout = request.retries_on_timeout();

        let outcome = self
            .retry_policy
            .run(|attempt| async move {
                let prepared = self.prepare(request).await.map_err(Attempt::Fail)?;

                tracing::debug!(
                    method = %prepared.method,
                    url = %prepared.url,
                    attempt,
                    "Sending OCAPI request"
                );

                match self.dispatch(&prepared).await {
                    Ok(response) => Ok(response),
                    Err(error) if error.is_timeout() && retry_on_timeout => {
                        tracing::warn!(
                            method = %prepared.method,
                            url = %prepared.url,
                            attempt,
                            "Request timed out"
                        );
                        Err(Attempt::Retry(HttpError::Network(error)))
                    }
                    Err(error) if error.is_timeout() => {
                        Err(Attempt::Fail(HttpError::IdempotentTimeout(
                            IdempotentTimeoutError::new(
                                prepared.method,
                                prepared.url.as_str(),
                                prepared.body.as_deref(),
                                &prepared.headers,
                            ),
                        )))
                    }
                    Err(error) => Err(Attempt::Fail(HttpError::Network(error))),
                }
            })
            .await;

        outcome.map_err(|failure| match failure {
            RetryFailure::Fatal(error) => error,
            RetryFailure::Exhausted { attempts, last } => {
                HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    method: request.http_method,
                    url: request.url.clone(),
                    tries: attempts,
                    message: last.to_string(),
                })
            }
        })
    }

    async fn prepare(&self, request: &HttpRequest) -> Result<PreparedRequest, HttpError> {
        let mut prepared = PreparedRequest {
            method: request.http_method,
            url: request.url.clone(),
            query: request.query.clone(),
            headers: self.default_headers.clone(),
            body: None,
        };

        Self::apply_content_type(&mut prepared, request)?;
        self.apply_authorization(&mut prepared, request).await?;

        Ok(prepared)
    }

    fn apply_content_type(
        prepared: &mut PreparedRequest,
        request: &HttpRequest,
    ) -> Result<(), InvalidHttpRequestError> {
        if let Some(body) = &request.body {
            let data_type = body.data_type()?;
            set_header(
                &mut prepared.headers,
                "Content-Type",
                data_type.as_content_type(),
            );
            prepared.body = Some(body.encode());
        }
        Ok(())
    }

    async fn apply_authorization(
        &self,
        prepared: &mut PreparedRequest,
        request: &HttpRequest,
    ) -> Result<(), AuthError> {
        let bearer = self.provider.auth_header().await?;
        set_header(&mut prepared.headers, "Authorization", &bearer);

        for (name, value) in &request.headers {
            set_header(&mut prepared.headers, name, value);
        }

        if let Some(basic) = &self.basic_auth {
            set_header(&mut prepared.headers, "Authorization", basic);
        }
        Ok(())
    }

    async fn dispatch(&self, prepared: &PreparedRequest) -> Result<HttpResponse, reqwest::Error> {
        let mut builder = self
            .client
            .request(prepared.method.as_reqwest(), &prepared.url);

        for (name, value) in &prepared.headers {
            builder = builder.header(name, value);
        }
        if !prepared.query.is_empty() {
            builder = builder.query(&prepared.query);
        }
        if let Some(body) = &prepared.body {
            builder = builder.body(body.clone());
        }

        let res = builder.send().await?;
        let code = res.status().as_u16();
        let headers = parse_response_headers(res.headers());
        let body = res.text().await?;

        tracing::debug!(
            method = %prepared.method,
            url = %prepared.url,
            status = code,
            "Received OCAPI response"
        );

        Ok(HttpResponse::new(
            code,
            prepared.method,
            prepared.url.as_str(),
            headers,
            body,
        ))
    }
}

/// Inserts a header, replacing any existing header with the same name
/// regardless of case.
fn set_header(headers: &mut Headers, name: &str, value: &str) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
}

/// Parses response headers into a `HashMap`.
fn parse_response_headers(
    headers: &reqwest::header::HeaderMap,
) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BasicAuth, ClientId, ClientSecret, OcapiConfig};

    fn provider(basic_auth: Option<BasicAuth>) -> Arc<TokenProvider> {
        let mut builder = OcapiConfig::builder()
            .client_id(ClientId::new("test-client").unwrap())
            .client_secret(ClientSecret::new("test-secret").unwrap())
            .user_agent_prefix("MyApp/1.0");
        if let Some(auth) = basic_auth {
            builder = builder.basic_auth(auth);
        }
        Arc::new(TokenProvider::new(builder.build().unwrap()).unwrap())
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(provider(None)).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Salesforce OCAPI Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(provider(None)).unwrap();
        assert_eq!(
            client.default_headers().get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_basic_auth_header_is_encoded() {
        let client = HttpClient::new(provider(Some(BasicAuth::new("storefront", "pw")))).unwrap();
        // "storefront:pw"
        assert_eq!(client.basic_auth.as_deref(), Some("Basic c3RvcmVmcm9udDpwdw=="));
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut headers = HashMap::new();
        headers.insert("authorization".to_string(), "Bearer a".to_string());
        set_header(&mut headers, "Authorization", "Basic b");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Authorization").map(String::as_str), Some("Basic b"));
    }

    #[test]
    fn test_content_type_step_rejects_plain_strings() {
        let mut request = HttpRequest::builder(HttpMethod::Put, "https://example.com")
            .build()
            .unwrap();
        request.body = Some(RequestBody::from("plain"));

        let mut prepared = PreparedRequest {
            method: request.http_method,
            url: request.url.clone(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        };

        assert!(HttpClient::apply_content_type(&mut prepared, &request).is_err());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
