use freshkeep_db::table;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::Date;

use crate::ListFilter;

impl super::Command {
    /// Re-classifies the user's active ingredients against `today` and stores
    /// the statuses that drifted. Returns how many rows changed.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_freshness(
        &self,
        user_id: &str,
        today: Date,
    ) -> freshkeep_shared::Result<usize> {
        let ingredients = self.query().list(user_id, ListFilter::default()).await?;

        let stale = ingredients
            .into_iter()
            .filter_map(|ingredient| {
                let status = ingredient.current_status(today);
                (status != ingredient.freshness_status).then_some((ingredient.id, status))
            })
            .collect::<Vec<_>>();

        if stale.is_empty() {
            return Ok(0);
        }

        let now = freshkeep_shared::now_timestamp();
        let mut tx = self.0.begin().await?;

        for (id, status) in stale.iter() {
            let statement = sea_query::Query::update()
                .table(table::Ingredient::Table)
                .values([
                    (table::Ingredient::FreshnessStatus, status.to_string().into()),
                    (table::Ingredient::UpdatedAt, now.into()),
                ])
                .and_where(Expr::col(table::Ingredient::Id).eq(id.to_owned()))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::debug!(changed = stale.len(), "freshness refreshed");

        Ok(stale.len())
    }
}
