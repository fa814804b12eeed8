use freshkeep_db::table;
use freshkeep_shared::{
    food::{Category, StorageType},
    ingredient::RegistrationSource,
    iso_date,
};
use sea_query::{InsertStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::Date;
use validator::Validate;

use crate::{Ingredient, query::COLUMNS};

/// Upper bound of a single bulk registration (photo or receipt batch).
pub const MAX_BULK_ITEMS: usize = 100;

fn default_quantity() -> f64 {
    1.0
}

fn default_unit() -> String {
    "개".to_owned()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub storage_type: Option<StorageType>,
    #[serde(default, with = "iso_date::option")]
    pub expiry_date: Option<Date>,
    #[serde(default = "default_quantity")]
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub memo: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub purchase_price: Option<i64>,
    #[serde(default)]
    pub source: RegistrationSource,
}

impl RegisterInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            storage_type: None,
            expiry_date: None,
            quantity: default_quantity(),
            unit: default_unit(),
            memo: None,
            purchase_price: None,
            source: RegistrationSource::default(),
        }
    }

    fn check(&self) -> freshkeep_shared::Result<()> {
        self.validate()?;

        if self.name.trim().is_empty() {
            return Err(freshkeep_shared::Error::InvalidInput(
                "name must not be blank".to_owned(),
            ));
        }

        Ok(())
    }

    /// Fills category, storage and expiry from the knowledge base when omitted.
    fn into_ingredient(self, user_id: &str, today: Date, now: i64) -> Ingredient {
        let name = self.name.trim().to_owned();
        let entry = freshkeep_food::knowledge_base().lookup(&name);

        let category = self
            .category
            .or_else(|| entry.map(|e| e.category))
            .unwrap_or_default();
        let storage_type = self
            .storage_type
            .or_else(|| entry.map(|e| e.default_storage))
            .unwrap_or_default();
        let expiry_date = self
            .expiry_date
            .unwrap_or_else(|| freshkeep_food::default_expiry(&name, storage_type, today));

        Ingredient {
            id: ulid::Ulid::new().to_string(),
            user_id: user_id.to_owned(),
            name,
            category,
            storage_type,
            registered_at: now,
            expiry_date,
            freshness_status: freshkeep_food::classify(expiry_date, today),
            quantity: self.quantity,
            unit: self.unit,
            memo: self.memo.filter(|memo| !memo.trim().is_empty()),
            is_consumed: false,
            is_wasted: false,
            consumed_at: None,
            purchase_price: self.purchase_price,
            source: self.source,
        }
    }
}

fn insert_statement(ingredients: &[Ingredient], now: i64) -> InsertStatement {
    let mut statement = sea_query::Query::insert()
        .into_table(table::Ingredient::Table)
        .columns(COLUMNS.into_iter().chain([table::Ingredient::UpdatedAt]))
        .to_owned();

    for ingredient in ingredients {
        statement.values_panic([
            ingredient.id.to_owned().into(),
            ingredient.user_id.to_owned().into(),
            ingredient.name.to_owned().into(),
            ingredient.category.to_string().into(),
            ingredient.storage_type.to_string().into(),
            ingredient.registered_at.into(),
            freshkeep_shared::format_date(ingredient.expiry_date).into(),
            ingredient.freshness_status.to_string().into(),
            ingredient.quantity.into(),
            ingredient.unit.to_owned().into(),
            ingredient.memo.to_owned().into(),
            ingredient.is_consumed.into(),
            ingredient.is_wasted.into(),
            ingredient.consumed_at.into(),
            ingredient.purchase_price.into(),
            ingredient.source.to_string().into(),
            now.into(),
        ]);
    }

    statement
}

impl super::Command {
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn register(
        &self,
        user_id: &str,
        input: RegisterInput,
        today: Date,
    ) -> freshkeep_shared::Result<Ingredient> {
        input.check()?;

        let now = freshkeep_shared::now_timestamp();
        let ingredient = input.into_ingredient(user_id, today, now);

        let (sql, values) =
            insert_statement(std::slice::from_ref(&ingredient), now).build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::info!(id = %ingredient.id, status = %ingredient.freshness_status, "ingredient registered");

        Ok(ingredient)
    }

    /// Registers a batch in one transaction. Nothing is stored when any item is invalid.
    #[tracing::instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn register_bulk(
        &self,
        user_id: &str,
        inputs: Vec<RegisterInput>,
        today: Date,
    ) -> freshkeep_shared::Result<Vec<Ingredient>> {
        if inputs.is_empty() || inputs.len() > MAX_BULK_ITEMS {
            freshkeep_shared::bail!("items must contain between 1 and {MAX_BULK_ITEMS} entries");
        }

        for (index, input) in inputs.iter().enumerate() {
            input.check().map_err(|err| match err {
                freshkeep_shared::Error::Validate(errors) => {
                    freshkeep_shared::Error::InvalidInput(format!("items[{index}]: {errors}"))
                }
                freshkeep_shared::Error::InvalidInput(message) => {
                    freshkeep_shared::Error::InvalidInput(format!("items[{index}]: {message}"))
                }
                other => other,
            })?;
        }

        let now = freshkeep_shared::now_timestamp();
        let ingredients = inputs
            .into_iter()
            .map(|input| input.into_ingredient(user_id, today, now))
            .collect::<Vec<_>>();

        let mut tx = self.0.begin().await?;
        for chunk in ingredients.chunks(25) {
            let (sql, values) = insert_statement(chunk, now).build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::info!(count = ingredients.len(), "ingredients registered");

        Ok(ingredients)
    }
}
