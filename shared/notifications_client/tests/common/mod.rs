//!
//! In-process fake of the notification service
//!

use axum::{
    extract::{Path, Query},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use notifications_client::{NotificationsApiConfig, NotificationsApiImpl};
use serde_json::{json, Value};
use std::{collections::HashMap, time::Duration};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

/// Notification id with characters reserved in urls
pub const RESERVED_ID: &str = "abc?x=1/#2";

pub async fn spawn_fake_service() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, routing()).await.unwrap();
    });

    format!("http://{address}")
}

pub fn create_api(base_url: String) -> NotificationsApiImpl {
    NotificationsApiImpl::new(NotificationsApiConfig {
        base_url,
        request_timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn routing() -> Router {
    Router::new()
        .route("/api/v1/notifications", get(list_notifications))
        .route("/api/v1/notifications/unread-count", get(unread_count))
        .route("/api/v1/notifications/read-all", patch(mark_all_as_read))
        .route("/api/v1/notifications/:id/read", patch(mark_as_read))
        .route(
            "/broken/notifications",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/garbage/notifications/unread-count",
            get(|| async { "definitely not json" }),
        )
}

fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {TOKEN}");
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == expected)
        .unwrap_or(false);

    match authorized {
        true => Ok(()),
        false => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn list_notifications(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;

    if query.get("limit").map(String::as_str) != Some("2") {
        return Ok(Json(json!({ "success": false })));
    }

    let body = match query.get("after").map(String::as_str) {
        None => json!({
            "success": true,
            "data": [
                {
                    "id": "b",
                    "type": "artwork_liked",
                    "createdAt": "2024-05-02T09:00:00Z",
                    "readAt": null,
                    "data": { "actorName": "mona", "artworkName": "Dunes" }
                },
                {
                    "id": "a",
                    "type": "order_placed",
                    "createdAt": "2024-05-01T09:00:00Z",
                    "readAt": "2024-05-01T10:00:00Z",
                    "data": { "artworkName": "Blue Hour", "price": 420 }
                }
            ],
            "nextCursor": "cursor-a"
        }),
        Some("cursor-a") => json!({
            "success": true,
            "data": [
                {
                    "id": "z",
                    "type": "system_maintenance",
                    "createdAt": "2024-04-01T09:00:00Z",
                    "data": { "window": "02:00-03:00" }
                }
            ],
            "nextCursor": null
        }),
        Some(_) => json!({ "success": false }),
    };

    Ok(Json(body))
}

async fn unread_count(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;

    Ok(Json(json!({ "success": true, "data": { "count": 3 } })))
}

async fn mark_as_read(
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;

    match id.as_str() {
        "a" | "b" | RESERVED_ID => Ok(Json(json!({ "success": true }))),
        "rejected" => Ok(Json(json!({ "success": false }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn mark_all_as_read(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;

    Ok(Json(json!({ "success": true })))
}
