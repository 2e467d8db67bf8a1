use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use kanau::processor::Processor;
use potluck_core::entities::rsvp::{CreateRsvp, CreateRsvpOutcome, ListRsvps};
use potluck_sdk::objects::{CreateRsvpRequest, RsvpResponse};

use crate::api::extractors::HostAuth;
use crate::state::AppState;

use super::EventApiError;

const MIN_FIRST_NAME_CHARS: usize = 2;

/// `GET /rsvps` — every response received so far.
pub async fn list_rsvps(
    State(state): State<AppState>,
    _auth: HostAuth,
) -> Result<impl IntoResponse, EventApiError> {
    let rsvps = state
        .store
        .process(ListRsvps)
        .await
        .map_err(EventApiError::Database)?;

    Ok(Json(rsvps.iter().map(RsvpResponse::from).collect::<Vec<_>>()))
}

/// `POST /rsvps` — record a guest's response.
///
/// An attending guest may claim one unclaimed dish in the same request.
pub async fn create_rsvp(
    State(state): State<AppState>,
    Json(body): Json<CreateRsvpRequest>,
) -> Result<impl IntoResponse, EventApiError> {
    let first_name = body.first_name.trim();
    if first_name.chars().count() < MIN_FIRST_NAME_CHARS {
        return Err(EventApiError::Validation(
            "first name must be at least 2 characters",
        ));
    }

    let note = body
        .note
        .map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty());

    let outcome = state
        .store
        .process(CreateRsvp {
            first_name: first_name.to_string(),
            attending: body.attending,
            plus_one: body.plus_one,
            note,
            item_id: body.item_id,
        })
        .await
        .map_err(EventApiError::Database)?;

    match outcome {
        CreateRsvpOutcome::Created(rsvp) => {
            Ok((StatusCode::CREATED, Json(RsvpResponse::from(&rsvp))))
        }
        CreateRsvpOutcome::ItemUnavailable => Err(EventApiError::ItemUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::TestApp;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_rsvp_claims_item() {
        let app = TestApp::new();
        let (_, item) = app
            .call_as_host(Method::POST, "/api/items", Some(json!({ "name": "Salad" })))
            .await;
        let item_id = item["id"].clone();

        let (status, rsvp) = app
            .call(
                Method::POST,
                "/api/rsvps",
                Some(json!({
                    "firstName": " Jo ",
                    "attending": true,
                    "plusOne": true,
                    "itemId": item_id,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(rsvp["firstName"], "Jo");
        assert_eq!(rsvp["itemId"], item_id);

        let (_, items) = app.call(Method::GET, "/api/items", None).await;
        assert_eq!(items[0]["assignee"], "Jo");

        let (status, body) = app
            .call(
                Method::POST,
                "/api/rsvps",
                Some(json!({ "firstName": "Sam", "attending": true, "itemId": item_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "item is no longer available");

        let (status, all) = app.call_as_host(Method::GET, "/api/rsvps", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_short_first_name_rejected() {
        let app = TestApp::new();
        let (status, body) = app
            .call(
                Method::POST,
                "/api/rsvps",
                Some(json!({ "firstName": " J ", "attending": false })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "first name must be at least 2 characters");
    }

    #[tokio::test]
    async fn test_rsvp_list_is_host_only() {
        let app = TestApp::new();
        let (status, _) = app.call(Method::GET, "/api/rsvps", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
