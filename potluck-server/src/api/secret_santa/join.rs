use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use kanau::processor::Processor;
use potluck_core::entities::participant::{JoinOutcome, JoinSecretSanta};
use potluck_sdk::objects::{JoinRequest, ParticipantResponse};

use crate::state::AppState;

use super::{SecretSantaApiError, ensure_enabled};

/// `POST /join` — add the caller to the exchange.
///
/// Names are unique ignoring case and surrounding whitespace.
pub async fn join(
    State(state): State<AppState>,
    Json(body): Json<JoinRequest>,
) -> Result<impl IntoResponse, SecretSantaApiError> {
    ensure_enabled(&state).await?;

    let name = body.name.trim();
    let preferences = body.preferences.trim();
    if name.is_empty() || preferences.is_empty() {
        return Err(SecretSantaApiError::MissingFields);
    }

    let outcome = state
        .store
        .process(JoinSecretSanta {
            name: name.to_string(),
            preferences: preferences.to_string(),
        })
        .await
        .map_err(SecretSantaApiError::Database)?;

    match outcome {
        JoinOutcome::Joined(participant) => {
            tracing::info!(participant_id = participant.id, "Secret Santa participant joined");
            Ok((
                StatusCode::CREATED,
                Json(ParticipantResponse::from(&participant)),
            ))
        }
        JoinOutcome::AlreadyJoined => Err(SecretSantaApiError::AlreadyJoined),
    }
}
