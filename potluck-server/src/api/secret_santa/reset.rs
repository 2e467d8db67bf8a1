use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;
use potluck_core::entities::participant::ResetDraw;
use potluck_sdk::objects::{ActionResponse, HostPinRequest};

use crate::api::verify_host_pin;
use crate::state::AppState;

use super::{SecretSantaApiError, ensure_enabled};

/// `POST /reset` — clear every assignment so a fresh draw can run.
///
/// Participants and their preferences are kept.
pub async fn reset(
    State(state): State<AppState>,
    Json(body): Json<HostPinRequest>,
) -> Result<impl IntoResponse, SecretSantaApiError> {
    ensure_enabled(&state).await?;

    if !verify_host_pin(&state, &body.pin).await {
        tracing::warn!("Secret Santa reset rejected: wrong host pin");
        return Err(SecretSantaApiError::InvalidPin);
    }

    let cleared = state
        .store
        .process(ResetDraw)
        .await
        .map_err(SecretSantaApiError::Database)?;

    tracing::info!(cleared, "Secret Santa draw reset");
    Ok(Json(ActionResponse {
        success: true,
        message: "Secret Santa draw has been reset.".to_string(),
    }))
}
