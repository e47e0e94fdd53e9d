use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Process-unique notification identifier: creation time in milliseconds
/// followed by a random tiebreaker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn generate(now: DateTime<Utc>) -> Self {
        NotificationId(format!("{}-{}", now.timestamp_millis(), Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        NotificationId(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Notification {
    #[schema(value_type = String, example = "1760520000000-0b8e6c1e-6a9f-4c1d-9d65-3f3f0b5a1f11")]
    pub id: NotificationId,
    pub kind: ToastKind,
    #[schema(example = "Employee added successfully.")]
    pub message: String,
    /// Zero means the toast stays until dismissed.
    #[schema(example = 4000)]
    pub duration_ms: u64,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
