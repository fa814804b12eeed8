use freshkeep_shared::{
    food::{Category, StorageType},
    ingredient::{FreshnessStatus, RegistrationSource},
    iso_date,
};
use serde::Serialize;
use time::Date;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: Category,
    pub storage_type: StorageType,
    pub registered_at: i64,
    #[serde(with = "iso_date")]
    pub expiry_date: Date,
    pub freshness_status: FreshnessStatus,
    pub quantity: f64,
    pub unit: String,
    pub memo: Option<String>,
    pub is_consumed: bool,
    pub is_wasted: bool,
    pub consumed_at: Option<i64>,
    pub purchase_price: Option<i64>,
    pub source: RegistrationSource,
}

impl Ingredient {
    /// Still in the fridge: neither eaten nor thrown away.
    pub fn is_active(&self) -> bool {
        !self.is_consumed && !self.is_wasted
    }

    pub fn days_left(&self, today: Date) -> i64 {
        freshkeep_food::days_left(self.expiry_date, today)
    }

    /// Freshness as of `today`, ignoring the cached value.
    pub fn current_status(&self, today: Date) -> FreshnessStatus {
        freshkeep_food::classify(self.expiry_date, today)
    }
}
