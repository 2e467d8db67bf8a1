//! RSVP types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpResponse {
    pub id: i32,
    pub first_name: String,
    pub attending: bool,
    pub plus_one: bool,
    pub note: Option<String>,
    pub item_id: Option<i32>,
    pub created_at: i64,
}

/// A guest's attendance response.
///
/// When `item_id` is set and the guest is attending, the item is claimed
/// in their name as part of the same submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRsvpRequest {
    pub first_name: String,
    pub attending: bool,
    #[serde(default)]
    pub plus_one: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub item_id: Option<i32>,
}
