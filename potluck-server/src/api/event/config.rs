use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;
use potluck_core::entities::event_config::{GetEventConfig, UpdateEventConfig};
use potluck_sdk::objects::{EventConfigResponse, UpdateEventConfigRequest};

use crate::api::extractors::HostAuth;
use crate::state::AppState;

use super::EventApiError;

/// `GET /config` — the current event configuration.
pub async fn get_config(State(state): State<AppState>) -> Result<impl IntoResponse, EventApiError> {
    let config = state
        .store
        .process(GetEventConfig)
        .await
        .map_err(EventApiError::Database)?;

    Ok(Json(EventConfigResponse::from(&config)))
}

/// `PATCH /config` — update any subset of the event fields.
///
/// The draw flag is not writable here; only a draw or reset changes it.
pub async fn update_config(
    State(state): State<AppState>,
    _auth: HostAuth,
    Json(body): Json<UpdateEventConfigRequest>,
) -> Result<impl IntoResponse, EventApiError> {
    if body.secret_santa_gift_limit.is_some_and(|limit| limit < 0) {
        return Err(EventApiError::Validation("gift limit must not be negative"));
    }

    let config = state
        .store
        .process(UpdateEventConfig::from(body))
        .await
        .map_err(EventApiError::Database)?;

    tracing::info!(
        secret_santa_enabled = config.secret_santa_enabled,
        "Event configuration updated"
    );
    Ok(Json(EventConfigResponse::from(&config)))
}
