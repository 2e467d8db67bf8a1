//! Host API client (host controls → Potluck server).
//!
//! Header-authenticated requests carry the plaintext PIN in the
//! `Potluck-Host-Pin` header; draw and reset carry it in the body.

use reqwest::Client;
use url::Url;

use super::{ClientError, expect_success, parse_response};
use crate::HOST_PIN_HEADER;
use crate::objects::{
    ActionResponse, CreateItemRequest, EventConfigResponse, HostPinRequest, ItemResponse,
    RsvpResponse, UpdateEventConfigRequest, ValidatePinResponse,
};

/// Typed HTTP client for the PIN-gated host endpoints.
#[derive(Debug, Clone)]
pub struct HostClient {
    http: Client,
    base_url: Url,
    pin: String,
}

impl HostClient {
    pub fn new(base_url: Url, pin: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            pin: pin.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    fn pin_body(&self) -> HostPinRequest {
        HostPinRequest {
            pin: self.pin.clone(),
        }
    }

    /// `POST /api/admin/validate` – check the PIN without side effects.
    pub async fn validate_pin(&self) -> Result<bool, ClientError> {
        let url = self.base_url.join("/api/admin/validate")?;
        let resp = self.http.post(url).json(&self.pin_body()).send().await?;
        let body: ValidatePinResponse = parse_response(resp).await?;
        Ok(body.valid)
    }

    /// `PATCH /api/config`
    pub async fn update_config(
        &self,
        update: &UpdateEventConfigRequest,
    ) -> Result<EventConfigResponse, ClientError> {
        let url = self.base_url.join("/api/config")?;
        let resp = self
            .http
            .patch(url)
            .header(HOST_PIN_HEADER, &self.pin)
            .json(update)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /api/items`
    pub async fn add_item(&self, name: impl Into<String>) -> Result<ItemResponse, ClientError> {
        let url = self.base_url.join("/api/items")?;
        let resp = self
            .http
            .post(url)
            .header(HOST_PIN_HEADER, &self.pin)
            .json(&CreateItemRequest { name: name.into() })
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `DELETE /api/items/{id}`
    pub async fn remove_item(&self, item_id: i32) -> Result<(), ClientError> {
        let url = self.base_url.join(&format!("/api/items/{item_id}"))?;
        let resp = self
            .http
            .delete(url)
            .header(HOST_PIN_HEADER, &self.pin)
            .send()
            .await?;
        expect_success(resp).await
    }

    /// `GET /api/rsvps`
    pub async fn list_rsvps(&self) -> Result<Vec<RsvpResponse>, ClientError> {
        let url = self.base_url.join("/api/rsvps")?;
        let resp = self
            .http
            .get(url)
            .header(HOST_PIN_HEADER, &self.pin)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /api/secret-santa/draw` – assign every participant a recipient.
    ///
    /// Calling this again re-rolls all assignments.
    pub async fn draw(&self) -> Result<ActionResponse, ClientError> {
        let url = self.base_url.join("/api/secret-santa/draw")?;
        let resp = self.http.post(url).json(&self.pin_body()).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/secret-santa/reset`
    pub async fn reset_draw(&self) -> Result<ActionResponse, ClientError> {
        let url = self.base_url.join("/api/secret-santa/reset")?;
        let resp = self.http.post(url).json(&self.pin_body()).send().await?;
        parse_response(resp).await
    }
}
