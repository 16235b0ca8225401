//! Orders and order notes.

use serde_json::Value;

use crate::clients::{Headers, HttpError, HttpResponse};
use crate::endpoints::{Api, Endpoint, EndpointBase};

/// The `orders` resource.
#[derive(Clone, Debug)]
pub struct Orders {
    base: EndpointBase,
}

impl Orders {
    /// Resource path segment.
    pub const RESOURCE: &'static str = "orders";

    /// Creates the endpoint.
    #[must_use]
    pub const fn new(base: EndpointBase) -> Self {
        Self { base }
    }

    /// Gets an order by number.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn get_order(
        &self,
        order_no: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[order_no]);
        self.base.http().get(&url, None, headers).await
    }

    /// Updates an order, e.g. its status or custom attributes.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn patch_order(
        &self,
        order_no: &str,
        body: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[order_no]);
        self.base
            .http()
            .patch(&url, Some(body.into()), headers, false)
            .await
    }

    /// Adds a note to an order. The note is `{"subject": …, "text": …}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn add_order_note(
        &self,
        order_no: &str,
        note: Value,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[order_no, "notes"]);
        self.base
            .http()
            .post(&url, Some(note.into()), None, headers, false)
            .await
    }

    /// Lists the notes of an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn get_order_notes(
        &self,
        order_no: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base.url(Api::Shop, Self::RESOURCE, &[order_no, "notes"]);
        self.base.http().get(&url, None, headers).await
    }

    /// Removes a note from an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be completed.
    pub async fn delete_order_note(
        &self,
        order_no: &str,
        note_id: &str,
        headers: Option<&Headers>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self
            .base
            .url(Api::Shop, Self::RESOURCE, &[order_no, "notes", note_id]);
        self.base.http().delete(&url, headers).await
    }
}

impl Endpoint for Orders {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        Self::RESOURCE
    }

    fn name(&self) -> &'static str {
        "Orders"
    }
}
