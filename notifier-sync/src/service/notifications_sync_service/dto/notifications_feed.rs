use notifications_client::dto::Notification;

///
/// Read-only snapshot of the synchronized notifications
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsFeed {
    /// Newest first, no duplicated ids
    pub notifications: Vec<Notification>,

    /// Reported by the server, optimistic decrements in between
    pub unread_count: u64,
    pub has_more: bool,

    pub loading: bool,
    pub loading_more: bool,
    pub refreshing: bool,
}
