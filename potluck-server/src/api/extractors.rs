//! Host authentication extractor.
//!
//! Host-only endpoints require the plaintext host PIN in the
//! `Potluck-Host-Pin` header. Secret Santa draw and reset take the PIN in
//! their JSON body instead and check it in the handler.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use potluck_sdk::HOST_PIN_HEADER;

use crate::api::{error_response, verify_host_pin};
use crate::state::AppState;

/// Proof that the request carried the correct host PIN.
pub struct HostAuth;

#[derive(Debug)]
pub enum HostAuthError {
    MissingPin,
    InvalidPin,
}

impl IntoResponse for HostAuthError {
    fn into_response(self) -> Response {
        let message = match self {
            HostAuthError::MissingPin => "missing host pin",
            HostAuthError::InvalidPin => "invalid host pin",
        };
        error_response(StatusCode::UNAUTHORIZED, message)
    }
}

impl FromRequestParts<AppState> for HostAuth {
    type Rejection = HostAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let pin = parts
            .headers
            .get(HOST_PIN_HEADER)
            .ok_or(HostAuthError::MissingPin)?
            .to_str()
            .map_err(|_| HostAuthError::InvalidPin)?;

        if !verify_host_pin(state, pin).await {
            tracing::warn!(path = %parts.uri.path(), "Rejected request with wrong host pin");
            return Err(HostAuthError::InvalidPin);
        }

        Ok(HostAuth)
    }
}
