use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use kanau::processor::Processor;
use potluck_core::entities::item::{CreateItem, DeleteItem, ListItems, SetItemAssignee};
use potluck_sdk::objects::{CreateItemRequest, ItemResponse, UpdateAssigneeRequest};

use crate::api::extractors::HostAuth;
use crate::state::AppState;

use super::EventApiError;

/// `GET /items` — every dish with its current claimant.
pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, EventApiError> {
    let items = state
        .store
        .process(ListItems)
        .await
        .map_err(EventApiError::Database)?;

    Ok(Json(items.iter().map(ItemResponse::from).collect::<Vec<_>>()))
}

/// `POST /items` — add a dish to the sign-up list.
pub async fn create_item(
    State(state): State<AppState>,
    _auth: HostAuth,
    Json(body): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, EventApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(EventApiError::Validation("item name is required"));
    }

    let item = state
        .store
        .process(CreateItem {
            name: name.to_string(),
        })
        .await
        .map_err(EventApiError::Database)?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(&item))))
}

/// `DELETE /items/{id}` — remove a dish. RSVPs pointing at it are detached.
pub async fn delete_item(
    State(state): State<AppState>,
    _auth: HostAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, EventApiError> {
    let removed = state
        .store
        .process(DeleteItem { id })
        .await
        .map_err(EventApiError::Database)?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(EventApiError::NotFound)
    }
}

/// `PATCH /items/{id}/assignee` — claim a dish, or release it with `null`.
pub async fn set_assignee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateAssigneeRequest>,
) -> Result<impl IntoResponse, EventApiError> {
    let assignee = body
        .assignee
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let item = state
        .store
        .process(SetItemAssignee { id, assignee })
        .await
        .map_err(EventApiError::Database)?
        .ok_or(EventApiError::NotFound)?;

    Ok(Json(ItemResponse::from(&item)))
}
