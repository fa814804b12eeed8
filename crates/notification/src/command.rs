use freshkeep_db::table;
use freshkeep_shared::{Error, notification::NotificationStatus};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{Notification, Query};

#[derive(Clone)]
pub struct Command(pub sqlx::SqlitePool);

impl Command {
    #[tracing::instrument(skip(self))]
    pub async fn mark_read(&self, user_id: &str, id: &str) -> freshkeep_shared::Result<Notification> {
        let Some(mut notification) = Query(self.0.clone()).find(id).await? else {
            return Err(Error::NotFound);
        };

        if notification.user_id != user_id {
            return Err(Error::Forbidden);
        }

        if notification.is_read() {
            return Ok(notification);
        }

        let now = freshkeep_shared::now_timestamp();
        let statement = sea_query::Query::update()
            .table(table::Notification::Table)
            .values([
                (
                    table::Notification::Status,
                    NotificationStatus::Read.to_string().into(),
                ),
                (table::Notification::ReadAt, now.into()),
            ])
            .and_where(Expr::col(table::Notification::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        notification.status = NotificationStatus::Read;
        notification.read_at = Some(now);

        Ok(notification)
    }

    /// Returns how many notifications were unread.
    #[tracing::instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: &str) -> freshkeep_shared::Result<u64> {
        let statement = sea_query::Query::update()
            .table(table::Notification::Table)
            .values([
                (
                    table::Notification::Status,
                    NotificationStatus::Read.to_string().into(),
                ),
                (
                    table::Notification::ReadAt,
                    freshkeep_shared::now_timestamp().into(),
                ),
            ])
            .and_where(Expr::col(table::Notification::UserId).eq(user_id))
            .and_where(Expr::col(table::Notification::ReadAt).is_null())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn mark_sent(&self, id: &str, now: i64) -> freshkeep_shared::Result<()> {
        let statement = sea_query::Query::update()
            .table(table::Notification::Table)
            .values([
                (
                    table::Notification::Status,
                    NotificationStatus::Sent.to_string().into(),
                ),
                (table::Notification::SentAt, now.into()),
            ])
            .and_where(Expr::col(table::Notification::Id).eq(id))
            .and_where(
                Expr::col(table::Notification::Status).eq(NotificationStatus::Pending.to_string()),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }
}
