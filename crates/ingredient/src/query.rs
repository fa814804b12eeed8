use freshkeep_db::table;
use freshkeep_shared::{
    Error,
    food::{Category, StorageType},
    ingredient::{FreshnessStatus, RegistrationSource},
};
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use strum::VariantArray;
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::Ingredient;

pub(crate) const COLUMNS: [table::Ingredient; 16] = [
    table::Ingredient::Id,
    table::Ingredient::UserId,
    table::Ingredient::Name,
    table::Ingredient::Category,
    table::Ingredient::StorageType,
    table::Ingredient::RegisteredAt,
    table::Ingredient::ExpiryDate,
    table::Ingredient::FreshnessStatus,
    table::Ingredient::Quantity,
    table::Ingredient::Unit,
    table::Ingredient::Memo,
    table::Ingredient::IsConsumed,
    table::Ingredient::IsWasted,
    table::Ingredient::ConsumedAt,
    table::Ingredient::PurchasePrice,
    table::Ingredient::Source,
];

#[derive(Debug, FromRow)]
pub struct IngredientRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: sqlx::types::Text<Category>,
    pub storage_type: sqlx::types::Text<StorageType>,
    pub registered_at: i64,
    pub expiry_date: String,
    pub freshness_status: sqlx::types::Text<FreshnessStatus>,
    pub quantity: f64,
    pub unit: String,
    pub memo: Option<String>,
    pub is_consumed: bool,
    pub is_wasted: bool,
    pub consumed_at: Option<i64>,
    pub purchase_price: Option<i64>,
    pub source: sqlx::types::Text<RegistrationSource>,
}

impl TryFrom<IngredientRow> for Ingredient {
    type Error = Error;

    fn try_from(row: IngredientRow) -> Result<Self, Self::Error> {
        let expiry_date = freshkeep_shared::parse_date(&row.expiry_date).map_err(|e| {
            Error::Unknown(anyhow::anyhow!("corrupt expiry date on {}: {e}", row.id))
        })?;

        Ok(Ingredient {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            category: row.category.0,
            storage_type: row.storage_type.0,
            registered_at: row.registered_at,
            expiry_date,
            freshness_status: row.freshness_status.0,
            quantity: row.quantity,
            unit: row.unit,
            memo: row.memo,
            is_consumed: row.is_consumed,
            is_wasted: row.is_wasted,
            consumed_at: row.consumed_at,
            purchase_price: row.purchase_price,
            source: row.source.0,
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    pub storage_type: Option<StorageType>,
    pub freshness_status: Option<FreshnessStatus>,
    /// Also return consumed and wasted ingredients.
    pub include_inactive: bool,
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    fn select() -> SelectStatement {
        sea_query::Query::select()
            .columns(COLUMNS)
            .from(table::Ingredient::Table)
            .to_owned()
    }

    async fn fetch_all(&self, statement: SelectStatement) -> freshkeep_shared::Result<Vec<Ingredient>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(Ingredient::try_from)
            .collect()
    }

    pub async fn find(&self, id: impl Into<String>) -> freshkeep_shared::Result<Option<Ingredient>> {
        let statement = Self::select()
            .and_where(Expr::col(table::Ingredient::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .map(Ingredient::try_from)
            .transpose()
    }

    /// Loads an ingredient on behalf of `user_id`, failing when it belongs to someone else.
    pub async fn find_owned(
        &self,
        user_id: &str,
        id: impl Into<String>,
    ) -> freshkeep_shared::Result<Ingredient> {
        let Some(ingredient) = self.find(id).await? else {
            return Err(Error::NotFound);
        };

        if ingredient.user_id != user_id {
            return Err(Error::Forbidden);
        }

        Ok(ingredient)
    }

    pub async fn list(
        &self,
        user_id: impl Into<String>,
        filter: ListFilter,
    ) -> freshkeep_shared::Result<Vec<Ingredient>> {
        let mut statement = Self::select()
            .and_where(Expr::col(table::Ingredient::UserId).eq(user_id.into()))
            .order_by(table::Ingredient::ExpiryDate, Order::Asc)
            .order_by(table::Ingredient::RegisteredAt, Order::Asc)
            .to_owned();

        if !filter.include_inactive {
            statement
                .and_where(Expr::col(table::Ingredient::IsConsumed).eq(false))
                .and_where(Expr::col(table::Ingredient::IsWasted).eq(false));
        }

        if let Some(storage_type) = filter.storage_type {
            statement.and_where(Expr::col(table::Ingredient::StorageType).eq(storage_type.to_string()));
        }

        if let Some(status) = filter.freshness_status {
            statement.and_where(Expr::col(table::Ingredient::FreshnessStatus).eq(status.to_string()));
        }

        self.fetch_all(statement).await
    }

    /// Active ingredients whose cached status is caution or urgent.
    pub async fn list_needing_attention(
        &self,
        user_id: impl Into<String>,
    ) -> freshkeep_shared::Result<Vec<Ingredient>> {
        let statement = Self::select()
            .and_where(Expr::col(table::Ingredient::UserId).eq(user_id.into()))
            .and_where(Expr::col(table::Ingredient::IsConsumed).eq(false))
            .and_where(Expr::col(table::Ingredient::IsWasted).eq(false))
            .and_where(
                Expr::col(table::Ingredient::FreshnessStatus).is_in(
                    FreshnessStatus::VARIANTS
                        .iter()
                        .filter(|status| status.needs_attention())
                        .map(|status| status.to_string()),
                ),
            )
            .order_by(table::Ingredient::ExpiryDate, Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    /// Users owning at least one active ingredient.
    pub async fn list_active_user_ids(&self) -> freshkeep_shared::Result<Vec<String>> {
        let statement = sea_query::Query::select()
            .distinct()
            .column(table::Ingredient::UserId)
            .from(table::Ingredient::Table)
            .and_where(Expr::col(table::Ingredient::IsConsumed).eq(false))
            .and_where(Expr::col(table::Ingredient::IsWasted).eq(false))
            .order_by(table::Ingredient::UserId, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(|(user_id,)| user_id).collect())
    }
}
