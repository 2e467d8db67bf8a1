//! Guest-facing API client (event page → Potluck server).

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::{
    CreateRsvpRequest, EventConfigResponse, ItemResponse, JoinRequest, MatchResponse,
    ParticipantResponse, RsvpResponse, UpdateAssigneeRequest,
};

/// Typed HTTP client for the unauthenticated guest endpoints.
#[derive(Debug, Clone)]
pub struct GuestClient {
    http: Client,
    base_url: Url,
}

impl GuestClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /api/config`
    pub async fn event_config(&self) -> Result<EventConfigResponse, ClientError> {
        let url = self.base_url.join("/api/config")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/items`
    pub async fn list_items(&self) -> Result<Vec<ItemResponse>, ClientError> {
        let url = self.base_url.join("/api/items")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `PATCH /api/items/{id}/assignee` – claim an item, or release it with `None`.
    pub async fn set_item_assignee(
        &self,
        item_id: i32,
        assignee: Option<String>,
    ) -> Result<ItemResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/items/{item_id}/assignee"))?;
        let resp = self
            .http
            .patch(url)
            .json(&UpdateAssigneeRequest { assignee })
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /api/rsvps`
    pub async fn submit_rsvp(&self, rsvp: &CreateRsvpRequest) -> Result<RsvpResponse, ClientError> {
        let url = self.base_url.join("/api/rsvps")?;
        let resp = self.http.post(url).json(rsvp).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/secret-santa/participants`
    pub async fn list_participants(&self) -> Result<Vec<ParticipantResponse>, ClientError> {
        let url = self.base_url.join("/api/secret-santa/participants")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/secret-santa/join`
    pub async fn join_secret_santa(
        &self,
        name: impl Into<String>,
        preferences: impl Into<String>,
    ) -> Result<ParticipantResponse, ClientError> {
        let url = self.base_url.join("/api/secret-santa/join")?;
        let resp = self
            .http
            .post(url)
            .json(&JoinRequest {
                name: name.into(),
                preferences: preferences.into(),
            })
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /api/secret-santa/my-match/{name}`
    ///
    /// An unknown name surfaces as `ClientError::Api` with status 404.
    pub async fn my_match(&self, name: &str) -> Result<MatchResponse, ClientError> {
        let url = self.base_url.join(&format!(
            "/api/secret-santa/my-match/{}",
            urlencoding::encode(name)
        ))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }
}
