use super::{NotificationDto, NotificationsPage};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsPageEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<NotificationDto>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl From<NotificationsPageEnvelope> for NotificationsPage {
    fn from(value: NotificationsPageEnvelope) -> Self {
        Self {
            notifications: value.data.into_iter().map(Into::into).collect(),
            next_cursor: value.next_cursor,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UnreadCountEnvelope {
    pub success: bool,
    pub data: Option<UnreadCount>,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCount {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct SuccessEnvelope {
    pub success: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn page_envelope_deserialize_ok() {
        let json = r#"{
            "success": true,
            "data": [
                {
                    "id": "a",
                    "type": "new_follower",
                    "createdAt": "2024-05-01T10:00:00Z",
                    "readAt": null,
                    "data": { "actorName": "mona" }
                }
            ],
            "nextCursor": "cursor-1"
        }"#;

        let envelope = serde_json::from_str::<NotificationsPageEnvelope>(json).unwrap();
        let page = NotificationsPage::from(envelope);

        assert_eq!(page.notifications.len(), 1);
        assert_eq!(page.next_cursor.as_deref(), Some("cursor-1"));
    }

    #[test]
    fn page_envelope_failure_without_data() {
        let json = r#"{ "success": false }"#;

        let envelope = serde_json::from_str::<NotificationsPageEnvelope>(json).unwrap();

        assert!(!envelope.success);
        assert!(envelope.data.is_empty());
        assert!(envelope.next_cursor.is_none());
    }

    #[test]
    fn unread_count_envelope_deserialize_ok() {
        let json = r#"{ "success": true, "data": { "count": 7 } }"#;

        let envelope = serde_json::from_str::<UnreadCountEnvelope>(json).unwrap();

        assert_eq!(envelope.data.unwrap().count, 7);
    }
}
