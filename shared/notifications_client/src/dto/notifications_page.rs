use super::Notification;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsPage {
    pub notifications: Vec<Notification>,

    ///
    /// `None` when there are no older pages
    ///
    pub next_cursor: Option<String>,
}
