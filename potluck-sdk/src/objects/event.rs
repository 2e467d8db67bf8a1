//! Event configuration request and response types.

use serde::{Deserialize, Deserializer, Serialize};

/// The event as shown to guests, including the Secret Santa settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfigResponse {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub background_image_url: Option<String>,
    pub theme_color: Option<String>,
    pub font_style: Option<String>,
    pub confirmation_message: Option<String>,
    pub secret_santa_enabled: bool,
    /// Gift budget. Display-only; nothing enforces it.
    pub secret_santa_gift_limit: i32,
    pub secret_santa_draw_completed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Partial update of the event configuration.
///
/// Absent fields are left unchanged. The four optional display fields also
/// accept an explicit `null`, which clears them (`Some(None)`). The draw
/// flag is deliberately missing: only a draw or a reset may flip it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventConfigRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_image_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub theme_color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_style: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub confirmation_message: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_santa_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_santa_gift_limit: Option<i32>,
}

/// Distinguish an explicit `null` (`Some(None)`) from an absent field,
/// which `#[serde(default)]` leaves as `None`.
fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
