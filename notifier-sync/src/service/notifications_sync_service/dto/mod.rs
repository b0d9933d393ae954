mod app_state;
mod notifications_feed;
mod notifications_sync_service_config;

pub use app_state::*;
pub use notifications_feed::*;
pub use notifications_sync_service_config::*;
