//!
//! Line commands that drive notifications sync from a terminal
//!

use crate::service::notifications_sync_service::{
    AppState, NotificationsFeed, NotificationsSyncService,
};
use anyhow::anyhow;
use std::str::FromStr;

#[derive(Debug, PartialEq)]
pub enum Command {
    Show,
    Refresh,
    More,
    Read(String),
    ReadAll,
    Count,
    AppState(AppState),
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(anyhow!("empty command"))?;

        let command = match name {
            "show" => Command::Show,
            "refresh" => Command::Refresh,
            "more" => Command::More,
            "read" => {
                let id = words
                    .next()
                    .ok_or(anyhow!("read requires notification id"))?;
                Command::Read(id.to_string())
            }
            "read-all" => Command::ReadAll,
            "count" => Command::Count,
            "foreground" => Command::AppState(AppState::Active),
            "inactive" => Command::AppState(AppState::Inactive),
            "background" => Command::AppState(AppState::Background),
            name => return Err(anyhow!("unknown command {name}")),
        };

        if words.next().is_some() {
            return Err(anyhow!("too many arguments for {name}"));
        }

        Ok(command)
    }
}

///
/// Execute command and render feed state after it
///
pub async fn execute(service: &dyn NotificationsSyncService, command: Command) -> String {
    tracing::debug!(?command, "executing command");

    match command {
        Command::Show => {}
        Command::Refresh => service.refresh().await,
        Command::More => service.load_more().await,
        Command::Read(id) => service.mark_as_read(&id).await,
        Command::ReadAll => service.mark_all_as_read().await,
        Command::Count => service.fetch_unread_count().await,
        Command::AppState(app_state) => service.app_state_changed(app_state).await,
    }

    let feed = service.subscribe().borrow().clone();
    render(&feed)
}

pub fn render(feed: &NotificationsFeed) -> String {
    let summary = format!(
        "unread: {} | notifications: {} | more: {}",
        feed.unread_count,
        feed.notifications.len(),
        if feed.has_more { "yes" } else { "no" },
    );

    let lines = feed.notifications.iter().map(|notification| {
        let marker = if notification.is_read() { ' ' } else { '*' };
        let line = format!(
            "{marker} {} {} {}",
            notification.created_at,
            notification.id,
            notification.kind(),
        );
        match notification.payload.artwork_name() {
            Some(artwork_name) => format!("{line} \"{artwork_name}\""),
            None => line,
        }
    });

    std::iter::once(summary)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::service::notifications_sync_service::MockNotificationsSyncService;
    use notifications_client::dto::{Notification, NotificationPayload, OrderData, OrderEvent};
    use time::macros::datetime;
    use tokio::sync::watch;

    #[test]
    fn parse_commands() {
        assert_eq!("show".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("  more ".parse::<Command>().unwrap(), Command::More);
        assert_eq!(
            "read 66310f".parse::<Command>().unwrap(),
            Command::Read("66310f".to_string())
        );
        assert_eq!(
            "background".parse::<Command>().unwrap(),
            Command::AppState(AppState::Background)
        );
        assert_eq!(
            "foreground".parse::<Command>().unwrap(),
            Command::AppState(AppState::Active)
        );
    }

    #[test]
    fn parse_invalid_commands() {
        assert!("".parse::<Command>().is_err());
        assert!("read".parse::<Command>().is_err());
        assert!("read a b".parse::<Command>().is_err());
        assert!("refresh now".parse::<Command>().is_err());
        assert!("delete a".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn execute_read_marks_notification() {
        let (feed_tx, _) = watch::channel(NotificationsFeed {
            unread_count: 1,
            ..Default::default()
        });

        let mut service = MockNotificationsSyncService::new();
        service
            .expect_mark_as_read()
            .withf(|id| id == "66310f")
            .times(1)
            .return_const(());
        service
            .expect_subscribe()
            .times(1)
            .returning(move || feed_tx.subscribe());

        let output = execute(&service, Command::Read("66310f".to_string())).await;

        assert!(output.starts_with("unread: 1 |"));
    }

    #[tokio::test]
    async fn execute_app_state_forwarded() {
        let (feed_tx, _) = watch::channel(NotificationsFeed::default());

        let mut service = MockNotificationsSyncService::new();
        service
            .expect_app_state_changed()
            .withf(|app_state| *app_state == AppState::Inactive)
            .times(1)
            .return_const(());
        service
            .expect_subscribe()
            .returning(move || feed_tx.subscribe());

        execute(&service, Command::AppState(AppState::Inactive)).await;
    }

    #[test]
    fn render_feed() {
        let feed = NotificationsFeed {
            notifications: vec![
                Notification {
                    id: "b".to_string(),
                    created_at: datetime!(2024-05-02 10:00 UTC),
                    read_at: None,
                    payload: NotificationPayload::Order(
                        OrderEvent::Paid,
                        OrderData {
                            artwork_name: Some("Dunes".to_string()),
                            ..Default::default()
                        },
                    ),
                },
                Notification {
                    id: "a".to_string(),
                    created_at: datetime!(2024-05-01 10:00 UTC),
                    read_at: Some(datetime!(2024-05-01 11:00 UTC)),
                    payload: NotificationPayload::Other {
                        kind: "promo".to_string(),
                        data: Default::default(),
                    },
                },
            ],
            unread_count: 1,
            has_more: true,
            ..Default::default()
        };

        let output = render(&feed);
        let lines = output.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "unread: 1 | notifications: 2 | more: yes");
        assert!(lines[1].starts_with("* "));
        assert!(lines[1].ends_with("b order_paid \"Dunes\""));
        assert!(lines[2].starts_with("  "));
        assert!(lines[2].ends_with("a promo"));
    }
}
