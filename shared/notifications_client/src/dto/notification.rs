use super::NotificationPayload;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

///
/// Notification exactly as it is sent by notification service
///
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub created_at: OffsetDateTime,

    ///
    /// `None` means unread
    ///
    pub read_at: Option<OffsetDateTime>,
    pub payload: NotificationPayload,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    pub fn kind(&self) -> &str {
        self.payload.kind()
    }
}

impl From<NotificationDto> for Notification {
    fn from(value: NotificationDto) -> Self {
        Self {
            id: value.id,
            created_at: value.created_at,
            read_at: value.read_at,
            payload: NotificationPayload::from_raw(value.kind, value.data),
        }
    }
}
