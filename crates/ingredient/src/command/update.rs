use freshkeep_db::table;
use freshkeep_shared::{
    Error,
    food::{Category, StorageType},
    iso_date,
};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::Date;
use validator::Validate;

use crate::Ingredient;

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub category: Option<Category>,
    pub storage_type: Option<StorageType>,
    #[serde(with = "iso_date::option")]
    pub expiry_date: Option<Date>,
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: Option<f64>,
    #[validate(length(min = 1, max = 20))]
    pub unit: Option<String>,
    #[validate(length(max = 500))]
    pub memo: Option<String>,
    #[validate(range(min = 0))]
    pub purchase_price: Option<i64>,
    pub is_consumed: Option<bool>,
    pub is_wasted: Option<bool>,
}

impl UpdateInput {
    /// Applies the changes to `ingredient`, recalculating expiry on a storage
    /// move and refreshing the cached freshness status.
    pub fn apply(
        self,
        mut ingredient: Ingredient,
        today: Date,
        now: i64,
    ) -> freshkeep_shared::Result<Ingredient> {
        self.validate()?;

        let consume = self.is_consumed == Some(true);
        let waste = self.is_wasted == Some(true);

        if consume && waste {
            return Err(Error::Conflict(
                "ingredient cannot be both consumed and wasted".to_owned(),
            ));
        }

        if (consume || waste) && !ingredient.is_active() {
            return Err(Error::Conflict(format!(
                "ingredient {} is already {}",
                ingredient.id,
                if ingredient.is_consumed { "consumed" } else { "wasted" }
            )));
        }

        if let Some(name) = self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::InvalidInput("name must not be blank".to_owned()));
            }
            ingredient.name = name.to_owned();
        }

        if let Some(category) = self.category {
            ingredient.category = category;
        }

        if let Some(storage_type) = self.storage_type
            && storage_type != ingredient.storage_type
        {
            if self.expiry_date.is_none() {
                let shelf_life =
                    freshkeep_food::resolve_shelf_life_days(&ingredient.name, storage_type);
                ingredient.expiry_date = freshkeep_food::recalculate_expiry(
                    ingredient.storage_type,
                    storage_type,
                    shelf_life,
                    today,
                );
            }

            ingredient.storage_type = storage_type;
        }

        if let Some(expiry_date) = self.expiry_date {
            ingredient.expiry_date = expiry_date;
        }

        if let Some(quantity) = self.quantity {
            ingredient.quantity = quantity;
        }

        if let Some(unit) = self.unit {
            ingredient.unit = unit;
        }

        if let Some(memo) = self.memo {
            ingredient.memo = Some(memo).filter(|memo| !memo.trim().is_empty());
        }

        if let Some(purchase_price) = self.purchase_price {
            ingredient.purchase_price = Some(purchase_price);
        }

        if let Some(is_consumed) = self.is_consumed {
            ingredient.is_consumed = is_consumed;
        }

        if let Some(is_wasted) = self.is_wasted {
            ingredient.is_wasted = is_wasted;
        }

        ingredient.consumed_at = match (consume || waste, ingredient.is_active()) {
            (true, _) => Some(now),
            (false, true) => None,
            (false, false) => ingredient.consumed_at,
        };

        ingredient.freshness_status = freshkeep_food::classify(ingredient.expiry_date, today);

        Ok(ingredient)
    }
}

impl super::Command {
    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        input: UpdateInput,
        today: Date,
    ) -> freshkeep_shared::Result<Ingredient> {
        let ingredient = self.query().find_owned(user_id, id).await?;

        let now = freshkeep_shared::now_timestamp();
        let ingredient = input.apply(ingredient, today, now)?;

        let statement = sea_query::Query::update()
            .table(table::Ingredient::Table)
            .values([
                (table::Ingredient::Name, ingredient.name.to_owned().into()),
                (
                    table::Ingredient::Category,
                    ingredient.category.to_string().into(),
                ),
                (
                    table::Ingredient::StorageType,
                    ingredient.storage_type.to_string().into(),
                ),
                (
                    table::Ingredient::ExpiryDate,
                    freshkeep_shared::format_date(ingredient.expiry_date).into(),
                ),
                (
                    table::Ingredient::FreshnessStatus,
                    ingredient.freshness_status.to_string().into(),
                ),
                (table::Ingredient::Quantity, ingredient.quantity.into()),
                (table::Ingredient::Unit, ingredient.unit.to_owned().into()),
                (table::Ingredient::Memo, ingredient.memo.to_owned().into()),
                (table::Ingredient::IsConsumed, ingredient.is_consumed.into()),
                (table::Ingredient::IsWasted, ingredient.is_wasted.into()),
                (table::Ingredient::ConsumedAt, ingredient.consumed_at.into()),
                (
                    table::Ingredient::PurchasePrice,
                    ingredient.purchase_price.into(),
                ),
                (table::Ingredient::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(table::Ingredient::Id).eq(ingredient.id.to_owned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::info!(
            id = %ingredient.id,
            storage = %ingredient.storage_type,
            status = %ingredient.freshness_status,
            "ingredient updated"
        );

        Ok(ingredient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freshkeep_shared::ingredient::{FreshnessStatus, RegistrationSource};
    use time::macros::date;

    const TODAY: Date = date!(2026 - 10 - 19);
    const NOW: i64 = 1_792_368_000;

    fn ingredient(name: &str, storage_type: StorageType, expiry_date: Date) -> Ingredient {
        Ingredient {
            id: "01J0000000000000000000000A".to_owned(),
            user_id: "user-1".to_owned(),
            name: name.to_owned(),
            category: Category::Meat,
            storage_type,
            registered_at: NOW - 86_400,
            expiry_date,
            freshness_status: FreshnessStatus::Fresh,
            quantity: 1.0,
            unit: "개".to_owned(),
            memo: None,
            is_consumed: false,
            is_wasted: false,
            consumed_at: None,
            purchase_price: None,
            source: RegistrationSource::Manual,
        }
    }

    #[test]
    fn test_thawing_gives_two_days() {
        let pork = ingredient("돼지고기", StorageType::Freezer, date!(2026 - 11 - 18));
        let input = UpdateInput {
            storage_type: Some(StorageType::Fridge),
            ..Default::default()
        };

        let updated = input.apply(pork, TODAY, NOW).unwrap();
        assert_eq!(updated.storage_type, StorageType::Fridge);
        assert_eq!(updated.expiry_date, date!(2026 - 10 - 21));
        assert_eq!(updated.freshness_status, FreshnessStatus::Caution);
    }

    #[test]
    fn test_freezing_uses_knowledge_base_shelf_life() {
        let pork = ingredient("돼지고기", StorageType::Fridge, date!(2026 - 10 - 20));
        let input = UpdateInput {
            storage_type: Some(StorageType::Freezer),
            ..Default::default()
        };

        let updated = input.apply(pork, TODAY, NOW).unwrap();
        assert_eq!(updated.expiry_date, TODAY + time::Duration::days(90));
        assert_eq!(updated.freshness_status, FreshnessStatus::Fresh);
    }

    #[test]
    fn test_explicit_expiry_wins_over_recalculation() {
        let pork = ingredient("돼지고기", StorageType::Freezer, date!(2026 - 11 - 18));
        let input = UpdateInput {
            storage_type: Some(StorageType::Fridge),
            expiry_date: Some(date!(2026 - 10 - 25)),
            ..Default::default()
        };

        let updated = input.apply(pork, TODAY, NOW).unwrap();
        assert_eq!(updated.expiry_date, date!(2026 - 10 - 25));
    }

    #[test]
    fn test_same_storage_keeps_expiry() {
        let pork = ingredient("돼지고기", StorageType::Fridge, date!(2026 - 10 - 19));
        let input = UpdateInput {
            storage_type: Some(StorageType::Fridge),
            ..Default::default()
        };

        let updated = input.apply(pork, TODAY, NOW).unwrap();
        assert_eq!(updated.expiry_date, TODAY);
        assert_eq!(updated.freshness_status, FreshnessStatus::Urgent);
    }

    #[test]
    fn test_consume_sets_consumed_at() {
        let milk = ingredient("우유", StorageType::Fridge, TODAY);
        let input = UpdateInput {
            is_consumed: Some(true),
            ..Default::default()
        };

        let updated = input.apply(milk, TODAY, NOW).unwrap();
        assert!(updated.is_consumed);
        assert!(!updated.is_active());
        assert_eq!(updated.consumed_at, Some(NOW));
    }

    #[test]
    fn test_consume_and_waste_conflict() {
        let milk = ingredient("우유", StorageType::Fridge, TODAY);
        let input = UpdateInput {
            is_consumed: Some(true),
            is_wasted: Some(true),
            ..Default::default()
        };

        assert!(matches!(
            input.apply(milk, TODAY, NOW),
            Err(Error::Conflict(_))
        ));
    }

    #[test]
    fn test_wasting_consumed_ingredient_conflicts() {
        let mut milk = ingredient("우유", StorageType::Fridge, TODAY);
        milk.is_consumed = true;
        milk.consumed_at = Some(NOW);

        let input = UpdateInput {
            is_wasted: Some(true),
            ..Default::default()
        };

        assert!(matches!(
            input.apply(milk, TODAY, NOW),
            Err(Error::Conflict(_))
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let milk = ingredient("우유", StorageType::Fridge, TODAY);
        let input = UpdateInput {
            name: Some("   ".to_owned()),
            ..Default::default()
        };

        assert!(matches!(
            input.apply(milk, TODAY, NOW),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let milk = ingredient("우유", StorageType::Fridge, TODAY);
        let input = UpdateInput {
            quantity: Some(0.0),
            ..Default::default()
        };

        assert!(matches!(
            input.apply(milk, TODAY, NOW),
            Err(Error::Validate(_))
        ));
    }
}
