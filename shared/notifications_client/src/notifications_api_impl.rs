use crate::{
    dto::{NotificationsPage, NotificationsPageEnvelope, SuccessEnvelope, UnreadCountEnvelope},
    error::Error,
    NotificationsApi,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NotificationsApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

pub struct NotificationsApiImpl {
    client: Client,
    base_url: Url,
}

impl NotificationsApiImpl {
    pub fn new(config: NotificationsApiConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| Error::InvalidBaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(config.base_url));
        }

        Ok(Self { client, base_url })
    }

    ///
    /// Every segment is percent-encoded, so ids may contain reserved characters
    ///
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("notifications")
            .extend(segments);

        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
        token: &str,
    ) -> Result<T, Error> {
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        let response = request.bearer_auth(token).send().await?;
        let response = Self::check_status(response)?;
        let body = response.json::<T>().await?;

        Ok(body)
    }

    fn check_status(response: Response) -> Result<Response, Error> {
        let status = response.status();
        match status.is_success() {
            true => Ok(response),
            false => Err(Error::Status(status)),
        }
    }
}

#[async_trait]
impl NotificationsApi for NotificationsApiImpl {
    #[tracing::instrument(
        name = "Notifications API",
        target = "notifications_client::api",
        skip_all,
        fields(limit = limit)
    )]
    async fn list_notifications(
        &self,
        token: &str,
        limit: u32,
        after: Option<String>,
    ) -> Result<NotificationsPage, Error> {
        tracing::debug!(?after, "listing notifications");

        let mut request = self
            .client
            .get(self.url(&[])?)
            .query(&[("limit", limit.to_string())]);
        if let Some(after) = after {
            request = request.query(&[("after", after)]);
        }

        let envelope = Self::send::<NotificationsPageEnvelope>(request, token).await?;
        if !envelope.success {
            return Err(Error::Unsuccessful {
                operation: "list notifications",
            });
        }

        let page = NotificationsPage::from(envelope);
        tracing::debug!(
            count = page.notifications.len(),
            has_more = page.next_cursor.is_some(),
            "listed notifications"
        );

        Ok(page)
    }

    #[tracing::instrument(
        name = "Notifications API",
        target = "notifications_client::api",
        skip_all
    )]
    async fn unread_count(&self, token: &str) -> Result<u64, Error> {
        tracing::debug!("fetching unread count");

        let request = self.client.get(self.url(&["unread-count"])?);
        let envelope = Self::send::<UnreadCountEnvelope>(request, token).await?;

        match envelope {
            UnreadCountEnvelope {
                success: true,
                data: Some(data),
            } => {
                tracing::debug!(count = data.count, "fetched unread count");
                Ok(data.count)
            }
            _ => Err(Error::Unsuccessful {
                operation: "unread count",
            }),
        }
    }

    #[tracing::instrument(
        name = "Notifications API",
        target = "notifications_client::api",
        skip_all,
        fields(id = id)
    )]
    async fn mark_as_read(&self, token: &str, id: &str) -> Result<(), Error> {
        tracing::debug!("marking notification as read");

        let request = self.client.patch(self.url(&[id, "read"])?);
        let envelope = Self::send::<SuccessEnvelope>(request, token).await?;
        if !envelope.success {
            return Err(Error::Unsuccessful {
                operation: "mark as read",
            });
        }

        tracing::debug!("marked notification as read");

        Ok(())
    }

    #[tracing::instrument(
        name = "Notifications API",
        target = "notifications_client::api",
        skip_all
    )]
    async fn mark_all_as_read(&self, token: &str) -> Result<(), Error> {
        tracing::debug!("marking all notifications as read");

        let request = self.client.patch(self.url(&["read-all"])?);
        let envelope = Self::send::<SuccessEnvelope>(request, token).await?;
        if !envelope.success {
            return Err(Error::Unsuccessful {
                operation: "mark all as read",
            });
        }

        tracing::debug!("marked all notifications as read");

        Ok(())
    }
}
