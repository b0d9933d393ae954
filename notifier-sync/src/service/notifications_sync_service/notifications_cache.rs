use notifications_client::dto::Notification;
use std::{cmp::Ordering, collections::HashMap};
use time::OffsetDateTime;

///
/// Local copy of the notifications feed keyed by notification id.
///
/// Notifications are always kept sorted by `created_at` descending,
/// notifications created at the same moment are ordered by id.
///
#[derive(Debug, Default)]
pub struct NotificationsCache {
    notifications: Vec<Notification>,
}

impl NotificationsCache {
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    ///
    /// Drop everything and keep only `page`
    ///
    pub fn replace(&mut self, page: Vec<Notification>) {
        self.notifications.clear();
        self.merge(page);
    }

    ///
    /// Upsert every notification from `page`.
    ///
    /// Notification received from the server always carries every field,
    /// so the incoming record replaces the cached one.
    ///
    pub fn merge(&mut self, page: Vec<Notification>) {
        let mut by_id = self
            .notifications
            .drain(..)
            .map(|notification| (notification.id.clone(), notification))
            .collect::<HashMap<_, _>>();

        for notification in page {
            by_id.insert(notification.id.clone(), notification);
        }

        let mut notifications = by_id.into_values().collect::<Vec<_>>();
        notifications.sort_by(Self::newest_first);

        self.notifications = notifications;
    }

    ///
    /// ### Returns
    /// `true` when unread notification was found and marked
    ///
    pub fn mark_read(&mut self, id: &str, read_at: OffsetDateTime) -> bool {
        match self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
        {
            Some(notification) if notification.read_at.is_none() => {
                notification.read_at = Some(read_at);
                true
            }
            _ => false,
        }
    }

    ///
    /// ### Returns
    /// number of notifications that were unread
    ///
    pub fn mark_all_read(&mut self, read_at: OffsetDateTime) -> usize {
        let mut marked = 0;
        for notification in self.notifications.iter_mut() {
            if notification.read_at.is_none() {
                notification.read_at = Some(read_at);
                marked += 1;
            }
        }

        marked
    }

    fn newest_first(a: &Notification, b: &Notification) -> Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    }
}
