use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NotificationsSyncServiceConfig {
    pub poll_interval: Duration,
    pub page_limit: u32,
}

impl Default for NotificationsSyncServiceConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            page_limit: 20,
        }
    }
}
