use axum::{
    Json,
    extract::{Path, State},
};
use freshkeep_notification::{InboxFilter, Notification};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    middleware::{ApiQuery, Auth},
};

use super::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InboxParams {
    pub unread: bool,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    auth: Auth,
    ApiQuery(params): ApiQuery<InboxParams>,
) -> Result<Json<InboxResponse>, AppError> {
    let notifications = state
        .notification_query
        .list(
            &auth.user_id,
            InboxFilter {
                unread_only: params.unread,
                limit: params.limit,
            },
        )
        .await?;
    let unread_count = state.notification_query.unread_count(&auth.user_id).await?;

    Ok(Json(InboxResponse {
        notifications,
        unread_count,
    }))
}

/// POST /api/notifications/check - Polled by clients to run the expiry check
pub async fn check(
    State(state): State<AppState>,
    auth: Auth,
) -> Result<Json<Value>, AppError> {
    let created = state.generator.check(&auth.user_id, state.today()).await?;

    Ok(Json(json!({ "created": created })))
}

/// POST /api/notifications/{id}/read
pub async fn read(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .notification_command
        .mark_read(&auth.user_id, &id)
        .await?;

    Ok(Json(notification))
}

/// POST /api/notifications/read-all
pub async fn read_all(
    State(state): State<AppState>,
    auth: Auth,
) -> Result<Json<Value>, AppError> {
    let updated = state.notification_command.mark_all_read(&auth.user_id).await?;

    Ok(Json(json!({ "updated": updated })))
}
