mod dto;
mod notifications_cache;
mod notifications_sync_service;
mod notifications_sync_service_impl;
mod notifications_sync_service_poller;

pub use dto::{AppState, NotificationsFeed, NotificationsSyncServiceConfig};
pub use notifications_cache::NotificationsCache;
pub use notifications_sync_service::*;
pub use notifications_sync_service_impl::*;
