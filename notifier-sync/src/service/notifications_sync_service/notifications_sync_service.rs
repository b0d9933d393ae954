use super::{AppState, NotificationsFeed};
use async_trait::async_trait;
use tokio::sync::watch;

///
/// Keeps local notifications feed in sync with notification service.
///
/// None of the functions return errors. Failures are logged and
/// previous state is kept or corrected by a refresh.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsSyncService: Send + Sync {
    ///
    /// Replace feed with the first page and fetch unread count.
    /// Runs once per service, later calls are ignored.
    ///
    async fn initial_load(&self);

    ///
    /// Merge the first page into the feed and fetch unread count.
    /// Ignored while another refresh is in flight.
    ///
    async fn refresh(&self);

    ///
    /// Merge the next older page into the feed.
    /// Ignored when there are no more pages or another page is being loaded.
    ///
    async fn load_more(&self);

    ///
    /// Mark notification as read locally and then on the server.
    /// Feed is refreshed when server call fails.
    ///
    async fn mark_as_read(&self, id: &str);

    ///
    /// Mark every notification as read locally and then on the server.
    /// Feed is refreshed when server call fails.
    ///
    async fn mark_all_as_read(&self);

    async fn fetch_unread_count(&self);

    ///
    /// Refresh feed when application comes back to the foreground
    ///
    async fn app_state_changed(&self, app_state: AppState);

    fn subscribe(&self) -> watch::Receiver<NotificationsFeed>;
}
