use freshkeep_shared::ingredient::FreshnessStatus;
use time::Date;

/// Whole days between `today` and `expiry`, negative once expired.
pub fn days_left(expiry: Date, today: Date) -> i64 {
    (expiry - today).whole_days()
}

pub fn classify(expiry: Date, today: Date) -> FreshnessStatus {
    FreshnessStatus::from_days_left(days_left(expiry, today))
}
