use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FreshnessStatus {
    #[default]
    Fresh,
    Caution,
    Urgent,
    Expired,
}

impl FreshnessStatus {
    /// Largest number of days left that still counts as urgent.
    pub const URGENT_MAX_DAYS: i64 = 1;
    /// Largest number of days left that still counts as caution.
    pub const CAUTION_MAX_DAYS: i64 = 3;

    pub fn from_days_left(days_left: i64) -> Self {
        match days_left {
            d if d < 0 => Self::Expired,
            d if d <= Self::URGENT_MAX_DAYS => Self::Urgent,
            d if d <= Self::CAUTION_MAX_DAYS => Self::Caution,
            _ => Self::Fresh,
        }
    }

    /// Whether the expiry sweep should look at an ingredient in this state.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Caution | Self::Urgent)
    }
}

/// How an ingredient entered the inventory.
#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationSource {
    #[default]
    Manual,
    Photo,
    Barcode,
    Receipt,
}
