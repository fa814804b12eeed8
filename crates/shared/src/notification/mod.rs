use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
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
pub enum NotificationType {
    #[serde(rename = "expiry_d3")]
    #[strum(serialize = "expiry_d3")]
    ExpiryD3,
    #[serde(rename = "expiry_d1")]
    #[strum(serialize = "expiry_d1")]
    ExpiryD1,
    #[serde(rename = "expiry_today")]
    #[strum(serialize = "expiry_today")]
    ExpiryToday,
    #[serde(rename = "weekly_summary")]
    #[strum(serialize = "weekly_summary")]
    WeeklySummary,
    #[serde(rename = "recipe")]
    #[strum(serialize = "recipe")]
    Recipe,
    #[serde(rename = "shopping")]
    #[strum(serialize = "shopping")]
    Shopping,
}

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
pub enum NotificationStatus {
    #[default]
    Pending,
    Sent,
    Read,
    Failed,
}

impl NotificationStatus {
    /// Statuses that still count against the one-notification-per-ingredient rule.
    pub const ACTIVE: [NotificationStatus; 2] =
        [NotificationStatus::Pending, NotificationStatus::Sent];

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_notification_type_wire_names() {
        assert_eq!(NotificationType::ExpiryD3.to_string(), "expiry_d3");
        assert_eq!(
            NotificationType::from_str("weekly_summary").unwrap(),
            NotificationType::WeeklySummary
        );
        assert_eq!(
            serde_json::to_string(&NotificationType::ExpiryD1).unwrap(),
            "\"expiry_d1\""
        );
    }

    #[test]
    fn test_active_statuses() {
        assert!(NotificationStatus::Pending.is_active());
        assert!(NotificationStatus::Sent.is_active());
        assert!(!NotificationStatus::Read.is_active());
        assert!(!NotificationStatus::Failed.is_active());
    }
}
