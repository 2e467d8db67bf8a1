//! Secret Santa request and response types.

use serde::{Deserialize, Serialize};

/// A participant as listed publicly. The assignment is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub id: i32,
    pub name: String,
    pub preferences: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub name: String,
    pub preferences: String,
}

/// The person a participant buys a gift for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRecipient {
    pub name: String,
    pub preferences: String,
}

/// Answer to `GET /my-match/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matched: bool,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<MatchedRecipient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MatchResponse {
    pub fn matched(recipient: MatchedRecipient) -> Self {
        Self {
            matched: true,
            recipient: Some(recipient),
            message: None,
        }
    }

    pub fn not_matched(message: impl Into<String>) -> Self {
        Self {
            matched: false,
            recipient: None,
            message: Some(message.into()),
        }
    }
}

/// Result of a host action such as a draw or a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}
