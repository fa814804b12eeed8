use std::{collections::HashSet, sync::Arc};

use freshkeep_db::table;
use freshkeep_ingredient::{Ingredient, ListFilter};
use freshkeep_shared::notification::{NotificationStatus, NotificationType};
use sea_query::{Expr, ExprTrait, Func, InsertStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::{Date, UtcOffset, Weekday};

use crate::{
    Command, ExpiryPayload, Notification, PushMessage, PushSender, WeeklySummary, query::COLUMNS,
};

/// Creates expiry and weekly summary notifications and hands them to a [`PushSender`].
#[derive(Clone)]
pub struct Generator {
    pool: SqlitePool,
    sender: Arc<dyn PushSender>,
    offset: UtcOffset,
}

impl Generator {
    pub fn new(pool: SqlitePool, sender: Arc<dyn PushSender>, offset: UtcOffset) -> Self {
        Self {
            pool,
            sender,
            offset,
        }
    }

    /// Today's date in the configured offset.
    pub fn today(&self) -> Date {
        freshkeep_shared::today(self.offset)
    }

    /// Notifies about every active ingredient in the caution or urgent band,
    /// at most once per ingredient and notification type while the previous
    /// one is still pending or sent.
    #[tracing::instrument(skip(self))]
    pub async fn generate_expiry_notifications(
        &self,
        user_id: &str,
        today: Date,
    ) -> freshkeep_shared::Result<usize> {
        let ingredients = freshkeep_ingredient::Query(self.pool.clone())
            .list_needing_attention(user_id)
            .await?;

        if ingredients.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;

        let statement = sea_query::Query::select()
            .columns([table::Notification::IngredientId, table::Notification::Type])
            .from(table::Notification::Table)
            .and_where(Expr::col(table::Notification::UserId).eq(user_id))
            .and_where(Expr::col(table::Notification::Type).is_in([
                NotificationType::ExpiryD3.to_string(),
                NotificationType::ExpiryD1.to_string(),
            ]))
            .and_where(
                Expr::col(table::Notification::Status)
                    .is_in(NotificationStatus::ACTIVE.map(|status| status.to_string())),
            )
            .and_where(
                Expr::col(table::Notification::IngredientId)
                    .is_in(ingredients.iter().map(|ingredient| ingredient.id.to_owned())),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let existing = sqlx::query_as_with::<
            _,
            (Option<String>, sqlx::types::Text<NotificationType>),
            _,
        >(&sql, values)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .filter_map(|(ingredient_id, notification_type)| {
            ingredient_id.map(|id| (id, notification_type.0))
        })
        .collect::<HashSet<_>>();

        let now = freshkeep_shared::now_timestamp();
        let notifications = ingredients
            .iter()
            .filter_map(|ingredient| {
                let days_left = ingredient.days_left(today);
                let notification_type = expiry_notification_type(days_left);

                if existing.contains(&(ingredient.id.to_owned(), notification_type)) {
                    tracing::debug!(
                        ingredient_id = %ingredient.id,
                        %notification_type,
                        "already notified"
                    );
                    return None;
                }

                Some(expiry_notification(ingredient, notification_type, days_left, now))
            })
            .collect::<Vec<_>>();

        if notifications.is_empty() {
            return Ok(0);
        }

        let (sql, values) = insert_statement(&notifications).build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(created = notifications.len(), "expiry notifications created");

        self.deliver(&notifications).await;

        Ok(notifications.len())
    }

    /// Creates one summary of the user's stock. Callers decide which day it runs on.
    #[tracing::instrument(skip(self))]
    pub async fn generate_weekly_summary(
        &self,
        user_id: &str,
        today: Date,
    ) -> freshkeep_shared::Result<usize> {
        let ingredients = freshkeep_ingredient::Query(self.pool.clone())
            .list(user_id, ListFilter::default())
            .await?;

        if ingredients.is_empty() {
            return Ok(0);
        }

        let day_start = freshkeep_shared::day_start_timestamp(today, self.offset);
        let day_end = day_start + 86_400;
        let statement = sea_query::Query::select()
            .expr(Func::count(Expr::col(table::Notification::Id)))
            .from(table::Notification::Table)
            .and_where(Expr::col(table::Notification::UserId).eq(user_id))
            .and_where(
                Expr::col(table::Notification::Type).eq(NotificationType::WeeklySummary.to_string()),
            )
            .and_where(
                Expr::col(table::Notification::Status)
                    .is_in(NotificationStatus::ACTIVE.map(|status| status.to_string())),
            )
            .and_where(Expr::col(table::Notification::ScheduledAt).gte(day_start))
            .and_where(Expr::col(table::Notification::ScheduledAt).lt(day_end))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (existing,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.pool)
            .await?;

        if existing > 0 {
            tracing::debug!("weekly summary already created today");
            return Ok(0);
        }

        let summary = summarize(&ingredients, today);
        let notification = Notification {
            id: ulid::Ulid::new().to_string(),
            user_id: user_id.to_owned(),
            notification_type: NotificationType::WeeklySummary,
            ingredient_id: None,
            title: "Your weekly fridge summary".to_owned(),
            body: format!(
                "{} items in stock: {} expiring within {} days, {} expired.",
                summary.total,
                summary.expiring_soon,
                WeeklySummary::HORIZON_DAYS,
                summary.expired
            ),
            payload: serde_json::json!(summary),
            // Stamped inside `today` so the dedup window above always sees it.
            scheduled_at: freshkeep_shared::now_timestamp().clamp(day_start, day_end - 1),
            sent_at: None,
            read_at: None,
            status: NotificationStatus::Pending,
        };

        let notifications = [notification];
        let (sql, values) = insert_statement(&notifications).build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        tracing::info!(total = summary.total, "weekly summary created");

        self.deliver(&notifications).await;

        Ok(1)
    }

    /// What a client poll triggers: refresh cached freshness, notify about
    /// expiring food and, on Mondays, produce the weekly summary.
    #[tracing::instrument(skip(self))]
    pub async fn check(&self, user_id: &str, today: Date) -> freshkeep_shared::Result<usize> {
        freshkeep_ingredient::Command(self.pool.clone())
            .refresh_freshness(user_id, today)
            .await?;

        let mut created = self.generate_expiry_notifications(user_id, today).await?;

        if today.weekday() == Weekday::Monday {
            created += self.generate_weekly_summary(user_id, today).await?;
        }

        Ok(created)
    }

    /// Runs the expiry check for every user with active ingredients. A failing
    /// user is logged and skipped.
    #[tracing::instrument(skip(self))]
    pub async fn sweep(&self, today: Date) -> freshkeep_shared::Result<usize> {
        let user_ids = freshkeep_ingredient::Query(self.pool.clone())
            .list_active_user_ids()
            .await?;
        let ingredients = freshkeep_ingredient::Command(self.pool.clone());

        let mut created = 0;
        for user_id in user_ids.iter() {
            if let Err(err) = ingredients.refresh_freshness(user_id, today).await {
                tracing::error!(user_id = %user_id, err = %err, "failed to refresh freshness");
                continue;
            }

            match self.generate_expiry_notifications(user_id, today).await {
                Ok(count) => created += count,
                Err(err) => {
                    tracing::error!(user_id = %user_id, err = %err, "failed to generate expiry notifications")
                }
            }
        }

        tracing::info!(users = user_ids.len(), created, "expiry sweep finished");

        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    pub async fn sweep_weekly(&self, today: Date) -> freshkeep_shared::Result<usize> {
        let user_ids = freshkeep_ingredient::Query(self.pool.clone())
            .list_active_user_ids()
            .await?;

        let mut created = 0;
        for user_id in user_ids.iter() {
            match self.generate_weekly_summary(user_id, today).await {
                Ok(count) => created += count,
                Err(err) => {
                    tracing::error!(user_id = %user_id, err = %err, "failed to generate weekly summary")
                }
            }
        }

        tracing::info!(users = user_ids.len(), created, "weekly sweep finished");

        Ok(created)
    }

    /// Pushes freshly stored notifications. The rows are already committed,
    /// so any failure here only leaves them pending: they stay in the inbox
    /// and keep blocking duplicates.
    async fn deliver(&self, notifications: &[Notification]) {
        let command = Command(self.pool.clone());

        for notification in notifications {
            let message = PushMessage::from(notification);

            if let Err(err) = self.sender.send(&notification.user_id, &message).await {
                tracing::warn!(
                    notification_id = %notification.id,
                    err = %err,
                    "failed to push notification"
                );
                continue;
            }

            if let Err(err) = command
                .mark_sent(&notification.id, freshkeep_shared::now_timestamp())
                .await
            {
                tracing::warn!(
                    notification_id = %notification.id,
                    err = %err,
                    "failed to mark notification sent"
                );
            }
        }
    }
}

pub fn expiry_notification_type(days_left: i64) -> NotificationType {
    if days_left <= 1 {
        NotificationType::ExpiryD1
    } else {
        NotificationType::ExpiryD3
    }
}

fn expiry_notification(
    ingredient: &Ingredient,
    notification_type: NotificationType,
    days_left: i64,
    now: i64,
) -> Notification {
    let name = &ingredient.name;
    let title = match days_left {
        ..0 => format!("{name} has expired"),
        0 => format!("{name} expires today"),
        1 => format!("{name} expires tomorrow"),
        days => format!("{name} expires in {days} days"),
    };
    let body = format!(
        "Best before {}. Use it soon or move it to the freezer.",
        freshkeep_shared::format_date(ingredient.expiry_date)
    );
    let payload = ExpiryPayload {
        ingredient_id: ingredient.id.to_owned(),
        days_left,
        expiry_date: ingredient.expiry_date,
    };

    Notification {
        id: ulid::Ulid::new().to_string(),
        user_id: ingredient.user_id.to_owned(),
        notification_type,
        ingredient_id: Some(ingredient.id.to_owned()),
        title,
        body,
        payload: serde_json::json!(payload),
        scheduled_at: now,
        sent_at: None,
        read_at: None,
        status: NotificationStatus::Pending,
    }
}

/// Counts the user's active stock as of `today`.
pub fn summarize(ingredients: &[Ingredient], today: Date) -> WeeklySummary {
    ingredients
        .iter()
        .filter(|ingredient| ingredient.is_active())
        .fold(WeeklySummary::default(), |mut summary, ingredient| {
            summary.total += 1;

            match ingredient.days_left(today) {
                ..0 => summary.expired += 1,
                days if days <= WeeklySummary::HORIZON_DAYS => summary.expiring_soon += 1,
                _ => {}
            }

            summary
        })
}

fn insert_statement(notifications: &[Notification]) -> InsertStatement {
    let mut statement = sea_query::Query::insert()
        .into_table(table::Notification::Table)
        .columns(COLUMNS)
        .to_owned();

    for notification in notifications {
        statement.values_panic([
            notification.id.to_owned().into(),
            notification.user_id.to_owned().into(),
            notification.notification_type.to_string().into(),
            notification.ingredient_id.to_owned().into(),
            notification.title.to_owned().into(),
            notification.body.to_owned().into(),
            notification.payload.to_string().into(),
            notification.scheduled_at.into(),
            notification.sent_at.into(),
            notification.read_at.into(),
            notification.status.to_string().into(),
        ]);
    }

    statement
}
