use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use potluck_core::entities::participant::ResolveMatch;

use crate::state::AppState;

use super::{SecretSantaApiError, ensure_enabled};

/// `GET /my-match/{name}` — whom `name` buys a gift for.
///
/// Never reveals who gives to `name`.
pub async fn my_match(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, SecretSantaApiError> {
    ensure_enabled(&state).await?;

    let outcome = state
        .store
        .process(ResolveMatch { name })
        .await
        .map_err(SecretSantaApiError::Database)?;

    let response = outcome
        .into_response()
        .ok_or(SecretSantaApiError::ParticipantNotFound)?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{TEST_PIN, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_two_participants_match_each_other() {
        let app = TestApp::with_secret_santa().await;
        for name in ["Ana", "Ben"] {
            app.call(
                Method::POST,
                "/api/secret-santa/join",
                Some(json!({ "name": name, "preferences": format!("for {name}") })),
            )
            .await;
        }
        app.call(
            Method::POST,
            "/api/secret-santa/draw",
            Some(json!({ "pin": TEST_PIN })),
        )
        .await;

        let (status, ana) = app
            .call(Method::GET, "/api/secret-santa/my-match/ANA", None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            ana,
            json!({ "matched": true, "match": { "name": "Ben", "preferences": "for Ben" } })
        );

        let (_, ben) = app
            .call(Method::GET, "/api/secret-santa/my-match/ben", None)
            .await;
        assert_eq!(ben["match"]["name"], "Ana");
    }

    #[tokio::test]
    async fn test_accented_name_finds_match() {
        let app = TestApp::with_secret_santa().await;
        for name in ["Élodie", "Bob"] {
            app.call(
                Method::POST,
                "/api/secret-santa/join",
                Some(json!({ "name": name, "preferences": format!("for {name}") })),
            )
            .await;
        }
        app.call(
            Method::POST,
            "/api/secret-santa/draw",
            Some(json!({ "pin": TEST_PIN })),
        )
        .await;

        // "Élodie" and "élodie", percent-encoded.
        for path in ["%C3%89lodie", "%C3%A9lodie"] {
            let (status, body) = app
                .call(
                    Method::GET,
                    &format!("/api/secret-santa/my-match/{path}"),
                    None,
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["match"]["name"], "Bob");
        }

        let (_, bob) = app
            .call(Method::GET, "/api/secret-santa/my-match/Bob", None)
            .await;
        assert_eq!(bob["match"]["name"], "Élodie");
    }

    #[tokio::test]
    async fn test_late_joiner_is_not_matched() {
        let app = TestApp::with_secret_santa().await;
        for name in ["Ana", "Ben"] {
            app.call(
                Method::POST,
                "/api/secret-santa/join",
                Some(json!({ "name": name, "preferences": "tea" })),
            )
            .await;
        }
        app.call(
            Method::POST,
            "/api/secret-santa/draw",
            Some(json!({ "pin": TEST_PIN })),
        )
        .await;

        let (status, _) = app
            .call(
                Method::POST,
                "/api/secret-santa/join",
                Some(json!({ "name": "Cy", "preferences": "tea" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app
            .call(Method::GET, "/api/secret-santa/my-match/Cy", None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"], false);
        assert!(body["message"].is_string());
    }
}
