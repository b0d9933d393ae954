use super::{
    notifications_sync_service_poller::NotificationsSyncServicePoller, AppState,
    NotificationsCache, NotificationsFeed, NotificationsSyncService,
    NotificationsSyncServiceConfig,
};
use async_trait::async_trait;
use notifications_client::{Error, NotificationsApi};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::{
    sync::{watch, Mutex, Notify},
    task::JoinHandle,
};

///
/// Notifications sync bound to a single auth token.
/// Create new instance whenever token changes.
///
/// With empty token every function is a no-op.
///
pub struct NotificationsSyncServiceImpl {
    inner: Arc<NotificationsSyncInner>,

    poller_handle: Option<JoinHandle<()>>,
    close_notify: Arc<Notify>,
}

struct NotificationsSyncInner {
    config: NotificationsSyncServiceConfig,
    api: Arc<dyn NotificationsApi>,
    token: String,

    state: Mutex<SyncState>,
    feed_tx: watch::Sender<NotificationsFeed>,
}

///
/// In-flight flags are checked and set while holding the lock,
/// so every guarded request is issued at most once at a time.
///
#[derive(Default)]
struct SyncState {
    cache: NotificationsCache,
    unread_count: u64,
    next_cursor: Option<String>,
    app_state: AppState,

    initialized: bool,
    loading: bool,
    refreshing: bool,
    loading_more: bool,

    /// Set on close, responses that arrive later are discarded
    closed: bool,
}

impl SyncState {
    fn feed(&self) -> NotificationsFeed {
        NotificationsFeed {
            notifications: self.cache.notifications().to_vec(),
            unread_count: self.unread_count,
            has_more: self.next_cursor.is_some(),
            loading: self.loading,
            loading_more: self.loading_more,
            refreshing: self.refreshing,
        }
    }

    fn apply_unread_count(&mut self, result: Result<u64, Error>) {
        match result {
            Ok(unread_count) => self.unread_count = unread_count,
            Err(err) => tracing::warn!(%err, "fetching unread count failed"),
        }
    }
}

impl NotificationsSyncServiceImpl {
    pub fn new(
        config: NotificationsSyncServiceConfig,
        api: Arc<dyn NotificationsApi>,
        token: String,
    ) -> Self {
        let (feed_tx, _) = watch::channel(NotificationsFeed::default());
        let state = Mutex::new(SyncState::default());

        let inner = NotificationsSyncInner {
            config,
            api,
            token,
            state,
            feed_tx,
        };

        Self {
            inner: Arc::new(inner),
            poller_handle: None,
            close_notify: Arc::new(Notify::new()),
        }
    }

    ///
    /// Load the first page and start polling
    ///
    #[tracing::instrument(name = "Notifications Sync", skip_all)]
    pub async fn start(&mut self) {
        if self.inner.token.is_empty() {
            tracing::info!("missing auth token, notifications sync stays idle");
            return;
        }
        if self.poller_handle.is_some() {
            tracing::warn!("notifications sync already started");
            return;
        }

        self.inner.initial_load().await;

        tracing::info!(
            poll_interval = ?self.inner.config.poll_interval,
            "starting poller"
        );
        let poller = NotificationsSyncServicePoller::new(self.inner.config.poll_interval);
        let inner = Arc::downgrade(&self.inner);
        let close_notify = Arc::clone(&self.close_notify);

        let handle = tokio::spawn(poller.run(close_notify, move || {
            let inner = inner.clone();
            async move {
                match inner.upgrade() {
                    Some(inner) => {
                        inner.refresh().await;
                        true
                    }
                    None => false,
                }
            }
        }));
        self.poller_handle = Some(handle);
    }

    ///
    /// Stop polling and clear the feed.
    /// Responses of requests still in flight are discarded.
    ///
    #[tracing::instrument(name = "Notifications Sync", skip_all)]
    pub async fn close(mut self) {
        tracing::info!("closing notifications sync");

        self.inner.close().await;

        if let Some(handle) = self.poller_handle.take() {
            self.close_notify.notify_one();
            if let Err(err) = handle.await {
                tracing::error!(%err, "poller task failed");
            }
        }

        tracing::info!("notifications sync closed");
    }
}

impl Drop for NotificationsSyncServiceImpl {
    fn drop(&mut self) {
        if let Some(handle) = self.poller_handle.take() {
            handle.abort();
        }
    }
}

impl NotificationsSyncInner {
    fn publish(&self, state: &SyncState) {
        self.feed_tx.send_replace(state.feed());
    }

    fn has_token(&self) -> bool {
        if self.token.is_empty() {
            tracing::trace!("missing auth token, skipping");
            return false;
        }

        true
    }

    async fn initial_load(&self) {
        if !self.has_token() {
            return;
        }

        {
            let mut state = self.state.lock().await;
            if state.closed || state.initialized {
                tracing::debug!("initial load already done");
                return;
            }
            state.initialized = true;
            state.loading = true;
            self.publish(&state);
        }

        tracing::info!("loading notifications");
        let (page, unread_count) = tokio::join!(
            self.api
                .list_notifications(&self.token, self.config.page_limit, None),
            self.api.unread_count(&self.token),
        );

        let mut state = self.state.lock().await;
        if state.closed {
            tracing::debug!("discarding response received after close");
            return;
        }

        state.loading = false;
        match page {
            Ok(page) => {
                tracing::info!(count = page.notifications.len(), "loaded notifications");
                state.cache.replace(page.notifications);
                state.next_cursor = page.next_cursor;
            }
            Err(err) => {
                tracing::warn!(%err, "loading notifications failed");
                state.cache.clear();
                state.next_cursor = None;
            }
        }
        state.apply_unread_count(unread_count);

        self.publish(&state);
    }

    async fn refresh(&self) {
        if !self.has_token() {
            return;
        }

        {
            let mut state = self.state.lock().await;
            if state.closed {
                return;
            }
            if state.refreshing {
                tracing::debug!("refresh already in flight");
                return;
            }
            state.refreshing = true;
            self.publish(&state);
        }

        tracing::debug!("refreshing notifications");
        let (page, unread_count) = tokio::join!(
            self.api
                .list_notifications(&self.token, self.config.page_limit, None),
            self.api.unread_count(&self.token),
        );

        let mut state = self.state.lock().await;
        if state.closed {
            tracing::debug!("discarding response received after close");
            return;
        }

        state.refreshing = false;
        match page {
            Ok(page) => {
                tracing::debug!(count = page.notifications.len(), "refreshed notifications");
                state.cache.merge(page.notifications);
                state.next_cursor = page.next_cursor;
            }
            Err(err) => tracing::warn!(%err, "refreshing notifications failed"),
        }
        state.apply_unread_count(unread_count);

        self.publish(&state);
    }

    async fn load_more(&self) {
        if !self.has_token() {
            return;
        }

        let cursor = {
            let mut state = self.state.lock().await;
            if state.closed || state.loading_more {
                return;
            }
            let Some(cursor) = state.next_cursor.clone() else {
                tracing::trace!("no more notifications");
                return;
            };
            state.loading_more = true;
            self.publish(&state);

            cursor
        };

        tracing::debug!(cursor = %cursor, "loading more notifications");
        let page = self
            .api
            .list_notifications(&self.token, self.config.page_limit, Some(cursor))
            .await;

        let mut state = self.state.lock().await;
        if state.closed {
            tracing::debug!("discarding response received after close");
            return;
        }

        state.loading_more = false;
        match page {
            Ok(page) => {
                tracing::debug!(count = page.notifications.len(), "loaded more notifications");
                state.cache.merge(page.notifications);
                state.next_cursor = page.next_cursor;
            }
            Err(err) => tracing::warn!(%err, "loading more notifications failed"),
        }

        self.publish(&state);
    }

    async fn mark_as_read(&self, id: &str) {
        if !self.has_token() {
            return;
        }

        {
            let mut state = self.state.lock().await;
            if state.closed {
                return;
            }
            if state.cache.mark_read(id, OffsetDateTime::now_utc()) {
                state.unread_count = state.unread_count.saturating_sub(1);
                self.publish(&state);
            }
        }

        tracing::info!("marking notification as read");
        match self.api.mark_as_read(&self.token, id).await {
            Ok(()) => tracing::info!("marked notification as read"),
            Err(err) => {
                tracing::warn!(%err, "marking notification as read failed, refreshing");
                self.refresh().await;
            }
        }
    }

    async fn mark_all_as_read(&self) {
        if !self.has_token() {
            return;
        }

        {
            let mut state = self.state.lock().await;
            if state.closed {
                return;
            }
            let marked = state.cache.mark_all_read(OffsetDateTime::now_utc());
            state.unread_count = 0;
            tracing::debug!(marked, "marked cached notifications as read");
            self.publish(&state);
        }

        tracing::info!("marking all notifications as read");
        match self.api.mark_all_as_read(&self.token).await {
            Ok(()) => tracing::info!("marked all notifications as read"),
            Err(err) => {
                tracing::warn!(%err, "marking all notifications as read failed, refreshing");
                self.refresh().await;
            }
        }
    }

    async fn fetch_unread_count(&self) {
        if !self.has_token() {
            return;
        }

        let unread_count = self.api.unread_count(&self.token).await;

        let mut state = self.state.lock().await;
        if state.closed {
            return;
        }
        state.apply_unread_count(unread_count);

        self.publish(&state);
    }

    async fn app_state_changed(&self, app_state: AppState) {
        let previous = {
            let mut state = self.state.lock().await;
            if state.closed {
                return;
            }
            std::mem::replace(&mut state.app_state, app_state)
        };

        tracing::debug!(previous = previous.as_ref(), "app state changed");
        if app_state.is_resumed_from(previous) {
            tracing::info!("app resumed, refreshing notifications");
            self.refresh().await;
        }
    }

    async fn close(&self) {
        let mut state = self.state.lock().await;
        *state = SyncState {
            closed: true,
            ..Default::default()
        };

        self.publish(&state);
    }
}

#[async_trait]
impl NotificationsSyncService for NotificationsSyncServiceImpl {
    #[tracing::instrument(name = "Notifications Sync", skip_all)]
    async fn initial_load(&self) {
        self.inner.initial_load().await;
    }

    #[tracing::instrument(name = "Notifications Sync", skip_all)]
    async fn refresh(&self) {
        self.inner.refresh().await;
    }

    #[tracing::instrument(name = "Notifications Sync", skip_all)]
    async fn load_more(&self) {
        self.inner.load_more().await;
    }

    #[tracing::instrument(name = "Notifications Sync", skip_all, fields(id = id))]
    async fn mark_as_read(&self, id: &str) {
        self.inner.mark_as_read(id).await;
    }

    #[tracing::instrument(name = "Notifications Sync", skip_all)]
    async fn mark_all_as_read(&self) {
        self.inner.mark_all_as_read().await;
    }

    #[tracing::instrument(name = "Notifications Sync", skip_all)]
    async fn fetch_unread_count(&self) {
        self.inner.fetch_unread_count().await;
    }

    #[tracing::instrument(
        name = "Notifications Sync",
        skip_all,
        fields(app_state = app_state.as_ref())
    )]
    async fn app_state_changed(&self, app_state: AppState) {
        self.inner.app_state_changed(app_state).await;
    }

    fn subscribe(&self) -> watch::Receiver<NotificationsFeed> {
        self.inner.feed_tx.subscribe()
    }
}
