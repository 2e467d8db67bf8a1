use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;
use potluck_core::entities::participant::PerformDraw;
use potluck_core::secret_santa::DrawOutcome;
use potluck_sdk::objects::{ActionResponse, HostPinRequest};

use crate::api::verify_host_pin;
use crate::state::AppState;

use super::{SecretSantaApiError, ensure_enabled};

/// `POST /draw` — give every participant a recipient.
///
/// Running it again re-rolls every assignment.
pub async fn draw(
    State(state): State<AppState>,
    Json(body): Json<HostPinRequest>,
) -> Result<impl IntoResponse, SecretSantaApiError> {
    ensure_enabled(&state).await?;

    if !verify_host_pin(&state, &body.pin).await {
        tracing::warn!("Secret Santa draw rejected: wrong host pin");
        return Err(SecretSantaApiError::InvalidPin);
    }

    let outcome = state
        .store
        .process(PerformDraw)
        .await
        .map_err(SecretSantaApiError::Database)?;

    match outcome {
        DrawOutcome::Drawn { participants } => {
            tracing::info!(participants, "Secret Santa draw completed");
            Ok(Json(ActionResponse {
                success: true,
                message: format!("Draw complete. {participants} participants have been matched."),
            }))
        }
        DrawOutcome::NotEnoughParticipants { count } => {
            tracing::info!(count, "Secret Santa draw refused: not enough participants");
            Err(SecretSantaApiError::NotEnoughParticipants)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{TEST_PIN, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_wrong_pin_rejected() {
        let app = TestApp::with_secret_santa().await;
        let (status, body) = app
            .call(
                Method::POST,
                "/api/secret-santa/draw",
                Some(json!({ "pin": "0000" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid host pin");
    }

    #[tokio::test]
    async fn test_single_participant_cannot_draw() {
        let app = TestApp::with_secret_santa().await;
        app.call(
            Method::POST,
            "/api/secret-santa/join",
            Some(json!({ "name": "Solo", "preferences": "tea" })),
        )
        .await;

        let (status, body) = app
            .call(
                Method::POST,
                "/api/secret-santa/draw",
                Some(json!({ "pin": TEST_PIN })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "at least 2 participants are needed for a draw");

        let (_, config) = app.call(Method::GET, "/api/config", None).await;
        assert_eq!(config["secretSantaDrawCompleted"], false);
    }

    #[tokio::test]
    async fn test_draw_reports_participant_count() {
        let app = TestApp::with_secret_santa().await;
        for name in ["Ana", "Ben", "Cy", "Di"] {
            app.call(
                Method::POST,
                "/api/secret-santa/join",
                Some(json!({ "name": name, "preferences": "tea" })),
            )
            .await;
        }

        let (status, body) = app
            .call(
                Method::POST,
                "/api/secret-santa/draw",
                Some(json!({ "pin": TEST_PIN })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Draw complete. 4 participants have been matched.",
            })
        );
    }
}
