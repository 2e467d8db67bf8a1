use crate::entities::unix_timestamp;
use crate::framework::{DatabaseProcessor, ensure_event_config};
use kanau::processor::Processor;
use potluck_sdk::objects::{EventConfigResponse, UpdateEventConfigRequest};

pub const DEFAULT_TITLE: &str = "Our Annual Dinner";
pub const DEFAULT_DESCRIPTION: &str = "Join us for an evening of good food, great company, and warm memories. Please let us know if you can make it!";
pub const DEFAULT_DATE: &str = "2024-12-20";
pub const DEFAULT_TIME: &str = "18:00";
pub const DEFAULT_LOCATION: &str = "123 Maple Avenue";
pub const DEFAULT_THEME_COLOR: &str = "hsl(145 20% 35%)";
pub const DEFAULT_FONT_STYLE: &str = "serif";
pub const DEFAULT_CONFIRMATION_MESSAGE: &str =
    "We're delighted you can join us. Your response has been recorded.";
pub const DEFAULT_GIFT_LIMIT: i32 = 20;

/// The singleton event configuration row.
///
/// `secret_santa_draw_completed` is the draw state flag: it is only written
/// by [`PerformDraw`](crate::entities::participant::PerformDraw) and
/// [`ResetDraw`](crate::entities::participant::ResetDraw).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EventConfig {
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
    pub secret_santa_gift_limit: i32,
    pub secret_santa_draw_completed: bool,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

impl EventConfig {
    /// The configuration a fresh event starts with.
    pub fn with_defaults(now: time::PrimitiveDateTime) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            date: DEFAULT_DATE.to_string(),
            time: DEFAULT_TIME.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            background_image_url: None,
            theme_color: Some(DEFAULT_THEME_COLOR.to_string()),
            font_style: Some(DEFAULT_FONT_STYLE.to_string()),
            confirmation_message: Some(DEFAULT_CONFIRMATION_MESSAGE.to_string()),
            secret_santa_enabled: false,
            secret_santa_gift_limit: DEFAULT_GIFT_LIMIT,
            secret_santa_draw_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the set fields of a partial update.
    pub fn apply(&mut self, update: UpdateEventConfig, now: time::PrimitiveDateTime) {
        let UpdateEventConfig {
            title,
            description,
            date,
            time,
            location,
            background_image_url,
            theme_color,
            font_style,
            confirmation_message,
            secret_santa_enabled,
            secret_santa_gift_limit,
        } = update;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = date {
            self.date = v;
        }
        if let Some(v) = time {
            self.time = v;
        }
        if let Some(v) = location {
            self.location = v;
        }
        if let Some(v) = background_image_url {
            self.background_image_url = v;
        }
        if let Some(v) = theme_color {
            self.theme_color = v;
        }
        if let Some(v) = font_style {
            self.font_style = v;
        }
        if let Some(v) = confirmation_message {
            self.confirmation_message = v;
        }
        if let Some(v) = secret_santa_enabled {
            self.secret_santa_enabled = v;
        }
        if let Some(v) = secret_santa_gift_limit {
            self.secret_santa_gift_limit = v;
        }
        self.updated_at = now;
    }
}

impl From<&EventConfig> for EventConfigResponse {
    fn from(c: &EventConfig) -> Self {
        EventConfigResponse {
            title: c.title.clone(),
            description: c.description.clone(),
            date: c.date.clone(),
            time: c.time.clone(),
            location: c.location.clone(),
            background_image_url: c.background_image_url.clone(),
            theme_color: c.theme_color.clone(),
            font_style: c.font_style.clone(),
            confirmation_message: c.confirmation_message.clone(),
            secret_santa_enabled: c.secret_santa_enabled,
            secret_santa_gift_limit: c.secret_santa_gift_limit,
            secret_santa_draw_completed: c.secret_santa_draw_completed,
            created_at: unix_timestamp(c.created_at),
            updated_at: unix_timestamp(c.updated_at),
        }
    }
}

#[derive(Debug, Clone)]
/// Read the event configuration, creating it with defaults if missing.
pub struct GetEventConfig;

impl Processor<GetEventConfig> for DatabaseProcessor {
    type Output = EventConfig;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetEventConfig")]
    async fn process(&self, _query: GetEventConfig) -> Result<EventConfig, sqlx::Error> {
        ensure_event_config(&self.pool).await?;
        let config = sqlx::query_as::<_, EventConfig>(
            r#"
            SELECT
                title,
                description,
                "date",
                "time",
                location,
                background_image_url,
                theme_color,
                font_style,
                confirmation_message,
                secret_santa_enabled,
                secret_santa_gift_limit,
                secret_santa_draw_completed,
                created_at,
                updated_at
            FROM event_config
            WHERE id = 1
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Partially update the event configuration. `None` fields are untouched.
pub struct UpdateEventConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    /// `Some(None)` clears the field.
    pub background_image_url: Option<Option<String>>,
    pub theme_color: Option<Option<String>>,
    pub font_style: Option<Option<String>>,
    pub confirmation_message: Option<Option<String>>,
    pub secret_santa_enabled: Option<bool>,
    pub secret_santa_gift_limit: Option<i32>,
}

impl From<UpdateEventConfigRequest> for UpdateEventConfig {
    fn from(r: UpdateEventConfigRequest) -> Self {
        UpdateEventConfig {
            title: r.title,
            description: r.description,
            date: r.date,
            time: r.time,
            location: r.location,
            background_image_url: r.background_image_url,
            theme_color: r.theme_color,
            font_style: r.font_style,
            confirmation_message: r.confirmation_message,
            secret_santa_enabled: r.secret_santa_enabled,
            secret_santa_gift_limit: r.secret_santa_gift_limit,
        }
    }
}

impl Processor<UpdateEventConfig> for DatabaseProcessor {
    type Output = EventConfig;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpdateEventConfig")]
    async fn process(&self, update: UpdateEventConfig) -> Result<EventConfig, sqlx::Error> {
        ensure_event_config(&self.pool).await?;
        let config = sqlx::query_as::<_, EventConfig>(
            r#"
            UPDATE event_config SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                "date" = COALESCE($3, "date"),
                "time" = COALESCE($4, "time"),
                location = COALESCE($5, location),
                background_image_url = CASE WHEN $6 THEN $7 ELSE background_image_url END,
                theme_color = CASE WHEN $8 THEN $9 ELSE theme_color END,
                font_style = CASE WHEN $10 THEN $11 ELSE font_style END,
                confirmation_message = CASE WHEN $12 THEN $13 ELSE confirmation_message END,
                secret_santa_enabled = COALESCE($14, secret_santa_enabled),
                secret_santa_gift_limit = COALESCE($15, secret_santa_gift_limit),
                updated_at = (NOW() AT TIME ZONE 'utc')
            WHERE id = 1
            RETURNING
                title,
                description,
                "date",
                "time",
                location,
                background_image_url,
                theme_color,
                font_style,
                confirmation_message,
                secret_santa_enabled,
                secret_santa_gift_limit,
                secret_santa_draw_completed,
                created_at,
                updated_at
            "#,
        )
        .bind(update.title)
        .bind(update.description)
        .bind(update.date)
        .bind(update.time)
        .bind(update.location)
        .bind(update.background_image_url.is_some())
        .bind(update.background_image_url.flatten())
        .bind(update.theme_color.is_some())
        .bind(update.theme_color.flatten())
        .bind(update.font_style.is_some())
        .bind(update.font_style.flatten())
        .bind(update.confirmation_message.is_some())
        .bind(update.confirmation_message.flatten())
        .bind(update.secret_santa_enabled)
        .bind(update.secret_santa_gift_limit)
        .fetch_one(&self.pool)
        .await?;
        Ok(config)
    }
}
