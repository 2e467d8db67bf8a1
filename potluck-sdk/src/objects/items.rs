//! Potluck item types.

use serde::{Deserialize, Serialize};

/// A dish on the potluck menu and who (if anyone) is bringing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i32,
    pub name: String,
    pub assignee: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
}

/// Claim (`Some`) or release (`None`) an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAssigneeRequest {
    pub assignee: Option<String>,
}
