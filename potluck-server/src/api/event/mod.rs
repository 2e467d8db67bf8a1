//! Event API handlers.
//!
//! # Endpoints
//!
//! - `GET    /config`                – event details and feature toggles
//! - `PATCH  /config`                – update event details (host)
//! - `GET    /items`                 – dish sign-up list
//! - `POST   /items`                 – add a dish (host)
//! - `DELETE /items/{id}`            – remove a dish (host)
//! - `PATCH  /items/{id}/assignee`   – claim or release a dish
//! - `GET    /rsvps`                 – all responses (host)
//! - `POST   /rsvps`                 – respond to the invitation

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch},
};

use crate::api::error_response;
use crate::state::AppState;

mod config;
mod items;
mod rsvps;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/config",
            get(config::get_config).patch(config::update_config),
        )
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/{id}", delete(items::delete_item))
        .route("/items/{id}/assignee", patch(items::set_assignee))
        .route("/rsvps", get(rsvps::list_rsvps).post(rsvps::create_rsvp))
}

/// Errors that can occur in event API handlers.
#[derive(Debug)]
pub(crate) enum EventApiError {
    Database(sqlx::Error),
    NotFound,
    Validation(&'static str),
    ItemUnavailable,
}

impl IntoResponse for EventApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            EventApiError::Database(e) => {
                tracing::error!(error = %e, "Event API database error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            EventApiError::NotFound => error_response(StatusCode::NOT_FOUND, "item not found"),
            EventApiError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
            EventApiError::ItemUnavailable => {
                error_response(StatusCode::CONFLICT, "item is no longer available")
            }
        }
    }
}
