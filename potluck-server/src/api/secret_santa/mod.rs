//! Secret Santa API handlers.
//!
//! Every endpoint answers 403 while the feature is switched off in the
//! event configuration.
//!
//! # Endpoints
//!
//! - `GET  /participants`     – who has joined (assignments hidden)
//! - `POST /join`             – join the exchange
//! - `GET  /my-match/{name}`  – reveal whom `name` gives to
//! - `POST /draw`             – assign recipients (host PIN in body)
//! - `POST /reset`            – clear all assignments (host PIN in body)

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use kanau::processor::Processor;
use potluck_core::entities::event_config::GetEventConfig;
use potluck_core::secret_santa::MIN_PARTICIPANTS;

use crate::api::error_response;
use crate::state::AppState;

mod draw;
mod join;
mod my_match;
mod participants;
mod reset;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/participants", get(participants::list_participants))
        .route("/join", post(join::join))
        .route("/my-match/{name}", get(my_match::my_match))
        .route("/draw", post(draw::draw))
        .route("/reset", post(reset::reset))
}

/// Errors that can occur in Secret Santa handlers.
#[derive(Debug)]
pub(crate) enum SecretSantaApiError {
    Database(sqlx::Error),
    Disabled,
    InvalidPin,
    MissingFields,
    AlreadyJoined,
    ParticipantNotFound,
    NotEnoughParticipants,
}

impl IntoResponse for SecretSantaApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SecretSantaApiError::Database(e) => {
                tracing::error!(error = %e, "Secret Santa API database error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            SecretSantaApiError::Disabled => {
                error_response(StatusCode::FORBIDDEN, "secret santa is not enabled")
            }
            SecretSantaApiError::InvalidPin => {
                error_response(StatusCode::UNAUTHORIZED, "invalid host pin")
            }
            SecretSantaApiError::MissingFields => error_response(
                StatusCode::BAD_REQUEST,
                "name and preferences are required",
            ),
            SecretSantaApiError::AlreadyJoined => {
                error_response(StatusCode::BAD_REQUEST, "already joined")
            }
            SecretSantaApiError::ParticipantNotFound => {
                error_response(StatusCode::NOT_FOUND, "participant not found")
            }
            SecretSantaApiError::NotEnoughParticipants => error_response(
                StatusCode::BAD_REQUEST,
                format!("at least {MIN_PARTICIPANTS} participants are needed for a draw"),
            ),
        }
    }
}

/// Fail with [`SecretSantaApiError::Disabled`] unless the feature is on.
pub(crate) async fn ensure_enabled(state: &AppState) -> Result<(), SecretSantaApiError> {
    let config = state
        .store
        .process(GetEventConfig)
        .await
        .map_err(SecretSantaApiError::Database)?;

    if config.secret_santa_enabled {
        Ok(())
    } else {
        Err(SecretSantaApiError::Disabled)
    }
}
