//!
//! Module with all dtos that are passed between notification service and client
//!

mod envelope;
mod notification;
mod notification_payload;
mod notifications_page;

pub(crate) use envelope::*;
pub use notification::*;
pub use notification_payload::*;
pub use notifications_page::*;
