//! HTTP API mounted under `/api`.
//!
//! # Areas
//!
//! - [`event`]         – event configuration, dish sign-up and RSVPs
//! - [`host`]          – host PIN validation
//! - [`secret_santa`]  – participants, draw and match reveal

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use potluck_core::config::PinVerifier;
use potluck_sdk::objects::ErrorResponse;

use crate::state::AppState;

pub(crate) mod event;
pub(crate) mod extractors;
mod host;
pub(crate) mod secret_santa;

#[cfg(test)]
pub(crate) mod test_support;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(event::router())
        .route("/admin/validate", post(host::validate_pin))
        .nest("/secret-santa", secret_santa::router())
}

/// Render `{"error": message}` with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// Check a submitted PIN against the configured host PIN.
///
/// argon2 verification is deliberately slow, so it runs on the blocking pool.
pub(crate) async fn verify_host_pin(state: &AppState, candidate: &str) -> bool {
    let host = state.config.host.read().await.clone();
    let candidate = candidate.to_owned();
    match tokio::task::spawn_blocking(move || host.verify_pin(&candidate)).await {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!(error = %e, "PIN verification task failed");
            false
        }
    }
}
