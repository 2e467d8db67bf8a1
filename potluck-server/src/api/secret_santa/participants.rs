use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;
use potluck_core::entities::participant::ListParticipants;
use potluck_sdk::objects::ParticipantResponse;

use crate::state::AppState;

use super::{SecretSantaApiError, ensure_enabled};

/// `GET /participants` — everyone who joined, without their assignments.
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, SecretSantaApiError> {
    ensure_enabled(&state).await?;

    let participants = state
        .store
        .process(ListParticipants)
        .await
        .map_err(SecretSantaApiError::Database)?;

    Ok(Json(
        participants
            .iter()
            .map(ParticipantResponse::from)
            .collect::<Vec<_>>(),
    ))
}
