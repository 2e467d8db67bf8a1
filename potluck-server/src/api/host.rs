use axum::{Json, extract::State, response::IntoResponse};
use potluck_sdk::objects::{HostPinRequest, ValidatePinResponse};

use crate::api::verify_host_pin;
use crate::state::AppState;

/// `POST /admin/validate` — tell the dashboard whether a PIN is correct.
///
/// Always answers 200; the body says whether the PIN matched.
pub async fn validate_pin(
    State(state): State<AppState>,
    Json(body): Json<HostPinRequest>,
) -> impl IntoResponse {
    let valid = verify_host_pin(&state, &body.pin).await;
    if !valid {
        tracing::warn!("Host PIN validation failed");
    }
    Json(ValidatePinResponse { valid })
}
