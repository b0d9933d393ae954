use crate::{dto::NotificationsPage, error::Error};
use async_trait::async_trait;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    ///
    /// Fetch one page of user notifications, newest first.
    /// Without `after` the first page is returned.
    ///
    /// ### Errors
    /// - [Error::MissingToken] when token is empty
    /// - [Error::Transport] when request failed or body couldn't be decoded
    /// - [Error::Status] when service responded with non-success status
    /// - [Error::Unsuccessful] when envelope contains `success: false`
    ///
    async fn list_notifications(
        &self,
        token: &str,
        limit: u32,
        after: Option<String>,
    ) -> Result<NotificationsPage, Error>;

    ///
    /// Fetch number of unread notifications.
    ///
    /// ### Errors
    /// Same as [NotificationsApi::list_notifications]
    ///
    async fn unread_count(&self, token: &str) -> Result<u64, Error>;

    ///
    /// Mark single notification as read.
    ///
    /// ### Errors
    /// Same as [NotificationsApi::list_notifications]
    ///
    async fn mark_as_read(&self, token: &str, id: &str) -> Result<(), Error>;

    ///
    /// Mark every notification of the user as read.
    ///
    /// ### Errors
    /// Same as [NotificationsApi::list_notifications]
    ///
    async fn mark_all_as_read(&self, token: &str) -> Result<(), Error>;
}
