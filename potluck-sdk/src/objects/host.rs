use serde::{Deserialize, Serialize};

/// Body of host actions that carry the PIN inline (`/draw`, `/reset`,
/// `/admin/validate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPinRequest {
    pub pin: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatePinResponse {
    pub valid: bool,
}
