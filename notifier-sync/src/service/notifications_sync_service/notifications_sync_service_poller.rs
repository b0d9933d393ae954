use std::{future::Future, sync::Arc, time::Duration};
use tokio::{
    sync::Notify,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};

pub struct NotificationsSyncServicePoller {
    interval: Interval,
}

impl NotificationsSyncServicePoller {
    ///
    /// First tick happens `poll_interval` after creation
    ///
    pub fn new(poll_interval: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + poll_interval, poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { interval }
    }

    ///
    /// Calls `refresh_fn` on every tick until `close_notify` is notified
    /// or `refresh_fn` returns `false`.
    ///
    #[tracing::instrument(name = "Notifications Poller", skip_all)]
    pub async fn run<F, Fut>(mut self, close_notify: Arc<Notify>, refresh_fn: F)
    where
        F: Fn() -> Fut,
        Fut: Future<Output = bool>,
    {
        tracing::info!("poller started");

        tokio::select! {
            biased;

            // Wait for signal to close
            _ = close_notify.notified() => {},

            // Refresh periodically
            _ = async { loop {
                self.interval.tick().await;
                tracing::debug!("poll tick");

                if !refresh_fn().await {
                    tracing::debug!("notifications sync service is gone");
                    break;
                }
            }} => {}
        }

        tracing::info!("poller finished");
    }
}
