pub mod event;
pub mod host;
pub mod items;
pub mod rsvp;
pub mod secret_santa;

pub use event::{EventConfigResponse, UpdateEventConfigRequest};
pub use host::{HostPinRequest, ValidatePinResponse};
pub use items::{CreateItemRequest, ItemResponse, UpdateAssigneeRequest};
pub use rsvp::{CreateRsvpRequest, RsvpResponse};
pub use secret_santa::{
    ActionResponse, JoinRequest, MatchResponse, MatchedRecipient, ParticipantResponse,
};

use serde::{Deserialize, Serialize};

/// Body of every non-2xx JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
