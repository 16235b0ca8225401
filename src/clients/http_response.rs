//! HTTP response types for the OCAPI SDK.
//!
//! Responses are returned for every status code; use
//! [`HttpResponse::error_for_status`] to turn a non-2xx status into an
//! [`HttpResponseError`].

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::errors::HttpResponseError;
use crate::clients::http_request::HttpMethod;

/// An HTTP response from OCAPI.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The method of the request that produced this response.
    pub method: HttpMethod,
    /// The URL of the request that produced this response.
    pub url: String,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(
        code: u16,
        method: HttpMethod,
        url: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            code,
            method,
            url: url.into(),
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `x-dw-request-id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-dw-request-id")
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Decodes the body as an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON,
    /// including when it is empty.
    pub fn json_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Returns an error if the status is not 2xx.
    ///
    /// The OCAPI `fault` document is decoded when present.
    ///
    /// # Errors
    ///
    /// Returns [`HttpResponseError`] for non-2xx responses.
    pub fn error_for_status(&self) -> Result<&Self, HttpResponseError> {
        if self.is_ok() {
            return Ok(self);
        }

        let fault = serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|body| body.get("fault").cloned());
        let fault_type = fault
            .as_ref()
            .and_then(|f| f.get("type"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let message = fault
            .as_ref()
            .and_then(|f| f.get("message"))
            .and_then(Value::as_str)
            .map_or_else(|| self.body.clone(), str::to_string);

        Err(HttpResponseError {
            code: self.code,
            message,
            fault_type,
        })
    }
}
