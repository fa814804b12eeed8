use freshkeep_db::table;
use freshkeep_shared::{
    Error,
    notification::{NotificationStatus, NotificationType},
};
use sea_query::{Expr, ExprTrait, Func, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::Notification;

pub(crate) const COLUMNS: [table::Notification; 11] = [
    table::Notification::Id,
    table::Notification::UserId,
    table::Notification::Type,
    table::Notification::IngredientId,
    table::Notification::Title,
    table::Notification::Body,
    table::Notification::Payload,
    table::Notification::ScheduledAt,
    table::Notification::SentAt,
    table::Notification::ReadAt,
    table::Notification::Status,
];

/// Inbox page size when the caller does not ask for one.
pub const DEFAULT_INBOX_LIMIT: u64 = 50;
pub const MAX_INBOX_LIMIT: u64 = 200;

#[derive(Debug, FromRow)]
pub struct NotificationRow {
    pub id: String,
    pub user_id: String,
    #[sqlx(rename = "type")]
    pub notification_type: sqlx::types::Text<NotificationType>,
    pub ingredient_id: Option<String>,
    pub title: String,
    pub body: String,
    pub payload: String,
    pub scheduled_at: i64,
    pub sent_at: Option<i64>,
    pub read_at: Option<i64>,
    pub status: sqlx::types::Text<NotificationStatus>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = Error;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let payload = serde_json::from_str(&row.payload).map_err(|e| {
            Error::Unknown(anyhow::anyhow!("corrupt payload on notification {}: {e}", row.id))
        })?;

        Ok(Notification {
            id: row.id,
            user_id: row.user_id,
            notification_type: row.notification_type.0,
            ingredient_id: row.ingredient_id,
            title: row.title,
            body: row.body,
            payload,
            scheduled_at: row.scheduled_at,
            sent_at: row.sent_at,
            read_at: row.read_at,
            status: row.status.0,
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct InboxFilter {
    pub unread_only: bool,
    pub limit: Option<u64>,
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> freshkeep_shared::Result<Option<Notification>> {
        let statement = sea_query::Query::select()
            .columns(COLUMNS)
            .from(table::Notification::Table)
            .and_where(Expr::col(table::Notification::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, NotificationRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .map(Notification::try_from)
            .transpose()
    }

    /// The user's notifications, newest first.
    pub async fn list(
        &self,
        user_id: impl Into<String>,
        filter: InboxFilter,
    ) -> freshkeep_shared::Result<Vec<Notification>> {
        let limit = filter
            .limit
            .unwrap_or(DEFAULT_INBOX_LIMIT)
            .clamp(1, MAX_INBOX_LIMIT);

        let mut statement = sea_query::Query::select()
            .columns(COLUMNS)
            .from(table::Notification::Table)
            .and_where(Expr::col(table::Notification::UserId).eq(user_id.into()))
            .order_by(table::Notification::ScheduledAt, Order::Desc)
            .order_by(table::Notification::Id, Order::Desc)
            .limit(limit)
            .to_owned();

        if filter.unread_only {
            statement.and_where(Expr::col(table::Notification::ReadAt).is_null());
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, NotificationRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(Notification::try_from)
            .collect()
    }

    pub async fn unread_count(&self, user_id: impl Into<String>) -> freshkeep_shared::Result<i64> {
        let statement = sea_query::Query::select()
            .expr(Func::count(Expr::col(table::Notification::Id)))
            .from(table::Notification::Table)
            .and_where(Expr::col(table::Notification::UserId).eq(user_id.into()))
            .and_where(Expr::col(table::Notification::ReadAt).is_null())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.0)
            .await?;

        Ok(count)
    }
}
