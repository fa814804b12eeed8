use freshkeep_shared::notification::{NotificationStatus, NotificationType};
use serde::Serialize;
use time::Date;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub ingredient_id: Option<String>,
    pub title: String,
    pub body: String,
    pub payload: serde_json::Value,
    pub scheduled_at: i64,
    pub sent_at: Option<i64>,
    pub read_at: Option<i64>,
    pub status: NotificationStatus,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryPayload {
    pub ingredient_id: String,
    pub days_left: i64,
    #[serde(with = "freshkeep_shared::iso_date")]
    pub expiry_date: Date,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub total: usize,
    pub expired: usize,
    /// Still edible but expiring within [`WeeklySummary::HORIZON_DAYS`].
    pub expiring_soon: usize,
}

impl WeeklySummary {
    pub const HORIZON_DAYS: i64 = 7;
}
