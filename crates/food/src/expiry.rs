use freshkeep_shared::food::StorageType;
use time::{Date, Duration};

use crate::knowledge_base;

/// Days a thawed item keeps in the fridge, whatever its frozen shelf life was.
pub const THAWED_SHELF_LIFE_DAYS: i64 = 2;

/// New expiry after moving an item between storage locations.
///
/// Moving resets the clock: the remaining shelf life of the previous
/// location is not carried over.
pub fn recalculate_expiry(
    current: StorageType,
    new: StorageType,
    shelf_life_days: u16,
    today: Date,
) -> Date {
    match (current, new) {
        (StorageType::Freezer, StorageType::Fridge) => {
            today + Duration::days(THAWED_SHELF_LIFE_DAYS)
        }
        _ => today + Duration::days(shelf_life_days.into()),
    }
}

/// Shelf life used when the knowledge base has nothing for a food/location.
pub fn fallback_shelf_life_days(storage: StorageType) -> u16 {
    match storage {
        StorageType::Fridge => 7,
        StorageType::Freezer => 30,
        StorageType::Room => 7,
    }
}

pub fn resolve_shelf_life_days(name: &str, storage: StorageType) -> u16 {
    knowledge_base()
        .lookup(name)
        .and_then(|entry| entry.shelf_life.days(storage))
        .unwrap_or_else(|| fallback_shelf_life_days(storage))
}

/// Expiry assigned to a freshly registered ingredient without an explicit date.
pub fn default_expiry(name: &str, storage: StorageType, today: Date) -> Date {
    today + Duration::days(resolve_shelf_life_days(name, storage).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 10 - 19);

    #[test]
    fn test_thawing_ignores_shelf_life() {
        for shelf_life in [0, 1, 30, 365, u16::MAX] {
            assert_eq!(
                recalculate_expiry(StorageType::Freezer, StorageType::Fridge, shelf_life, TODAY),
                date!(2026 - 10 - 21)
            );
        }
    }

    #[test]
    fn test_other_moves_reset_the_clock() {
        let pairs = [
            (StorageType::Fridge, StorageType::Freezer),
            (StorageType::Fridge, StorageType::Room),
            (StorageType::Freezer, StorageType::Room),
            (StorageType::Room, StorageType::Fridge),
            (StorageType::Room, StorageType::Freezer),
            (StorageType::Fridge, StorageType::Fridge),
        ];

        for (from, to) in pairs {
            assert_eq!(
                recalculate_expiry(from, to, 10, TODAY),
                date!(2026 - 10 - 29),
                "{from} -> {to}"
            );
        }
    }

    #[test]
    fn test_default_expiry_uses_knowledge_base() {
        assert_eq!(
            default_expiry("우유", StorageType::Fridge, TODAY),
            TODAY + Duration::days(7)
        );
        assert_eq!(
            default_expiry("pork", StorageType::Freezer, TODAY),
            TODAY + Duration::days(90)
        );
    }

    #[test]
    fn test_default_expiry_falls_back_per_storage() {
        assert_eq!(
            default_expiry("dragon fruit sorbet", StorageType::Freezer, TODAY),
            TODAY + Duration::days(30)
        );
        // known food, no value for that location
        assert_eq!(
            resolve_shelf_life_days("우유", StorageType::Room),
            fallback_shelf_life_days(StorageType::Room)
        );
    }
}
