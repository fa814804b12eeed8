use freshkeep_db::table;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Removes the ingredient together with every notification pointing at it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: &str, id: &str) -> freshkeep_shared::Result<()> {
        let ingredient = self.query().find_owned(user_id, id).await?;

        let mut tx = self.0.begin().await?;

        let statement = sea_query::Query::delete()
            .from_table(table::Notification::Table)
            .and_where(Expr::col(table::Notification::IngredientId).eq(ingredient.id.to_owned()))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = sea_query::Query::delete()
            .from_table(table::Ingredient::Table)
            .and_where(Expr::col(table::Ingredient::Id).eq(ingredient.id.to_owned()))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(id = %ingredient.id, "ingredient deleted");

        Ok(())
    }
}
