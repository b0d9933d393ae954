use super::ApplicationEnv;
use notifications_client::{NotificationsApiConfig, NotificationsApiImpl};
use notifier_sync::service::notifications_sync_service::{
    NotificationsSyncServiceConfig, NotificationsSyncServiceImpl,
};
use std::sync::Arc;

pub struct ApplicationState {
    pub notifications_sync_service: NotificationsSyncServiceImpl,
}

pub async fn create_state(env: &ApplicationEnv) -> anyhow::Result<ApplicationState> {
    tracing::info!("creating notifications api client");
    let config = NotificationsApiConfig {
        base_url: env.api_base_url.clone(),
        request_timeout: env.request_timeout,
    };
    let notifications_api = NotificationsApiImpl::new(config)?;
    let notifications_api = Arc::new(notifications_api);

    tracing::info!("creating services");
    let config = NotificationsSyncServiceConfig {
        poll_interval: env.poll_interval,
        page_limit: env.page_limit,
    };
    let mut notifications_sync_service =
        NotificationsSyncServiceImpl::new(config, notifications_api, env.auth_token.clone());

    tracing::info!("starting notifications sync");
    notifications_sync_service.start().await;

    Ok(ApplicationState {
        notifications_sync_service,
    })
}
