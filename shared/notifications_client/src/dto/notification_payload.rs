//!
//! Notification payload is keyed by notification type.
//! Known types are decoded into typed data, everything else
//! is kept as it was received.
//!

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationPayload {
    Order(OrderEvent, OrderData),
    Bid(BidEvent, BidData),
    Social(SocialEvent, SocialData),
    Moderation(ModerationEvent, ModerationData),

    ///
    /// Unrecognized type or data that doesn't match the type
    ///
    Other { kind: String, data: Value },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
pub enum OrderEvent {
    #[strum(serialize = "order_placed")]
    Placed,
    #[strum(serialize = "order_paid")]
    Paid,
    #[strum(serialize = "order_shipped")]
    Shipped,
    #[strum(serialize = "order_delivered")]
    Delivered,
    #[strum(serialize = "order_cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
pub enum BidEvent {
    #[strum(serialize = "bid_placed")]
    Placed,
    #[strum(serialize = "bid_outbid")]
    Outbid,
    #[strum(serialize = "bid_accepted")]
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SocialEvent {
    NewFollower,
    ArtworkLiked,
    NewComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ModerationEvent {
    ArtworkApproved,
    ArtworkRejected,
    AccountWarning,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub order_id: Option<String>,
    pub artwork_name: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidData {
    pub artwork_name: Option<String>,
    pub amount: Option<f64>,
    pub actor_id: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialData {
    pub actor_id: Option<String>,
    pub actor_name: Option<String>,
    pub artwork_name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationData {
    pub artwork_name: Option<String>,
    pub reason: Option<String>,
    pub image_url: Option<String>,
}

impl NotificationPayload {
    pub fn from_raw(kind: String, data: Value) -> Self {
        let data = match data {
            Value::Null => Value::Object(Map::new()),
            data => data,
        };

        let payload = if let Ok(event) = OrderEvent::from_str(&kind) {
            decode(&data).map(|data| Self::Order(event, data))
        } else if let Ok(event) = BidEvent::from_str(&kind) {
            decode(&data).map(|data| Self::Bid(event, data))
        } else if let Ok(event) = SocialEvent::from_str(&kind) {
            decode(&data).map(|data| Self::Social(event, data))
        } else if let Ok(event) = ModerationEvent::from_str(&kind) {
            decode(&data).map(|data| Self::Moderation(event, data))
        } else {
            None
        };

        payload.unwrap_or_else(|| {
            tracing::trace!(kind, "keeping untyped notification payload");
            Self::Other { kind, data }
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Order(event, _) => event.as_ref(),
            Self::Bid(event, _) => event.as_ref(),
            Self::Social(event, _) => event.as_ref(),
            Self::Moderation(event, _) => event.as_ref(),
            Self::Other { kind, data: _ } => kind,
        }
    }

    pub fn artwork_name(&self) -> Option<&str> {
        match self {
            Self::Order(_, data) => data.artwork_name.as_deref(),
            Self::Bid(_, data) => data.artwork_name.as_deref(),
            Self::Social(_, data) => data.artwork_name.as_deref(),
            Self::Moderation(_, data) => data.artwork_name.as_deref(),
            Self::Other { kind: _, data } => data.get("artworkName").and_then(Value::as_str),
        }
    }
}

fn decode<T: DeserializeOwned>(data: &Value) -> Option<T> {
    T::deserialize(data).ok()
}
