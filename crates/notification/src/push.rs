use serde::Serialize;

use crate::Notification;

/// What a device receives for a notification.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    /// Collapses repeated pushes about the same thing on the device.
    pub tag: String,
    pub data: serde_json::Value,
}

impl From<&Notification> for PushMessage {
    fn from(notification: &Notification) -> Self {
        let tag = match &notification.ingredient_id {
            Some(ingredient_id) => format!("{}-{ingredient_id}", notification.notification_type),
            None => notification.notification_type.to_string(),
        };

        Self {
            title: notification.title.to_owned(),
            body: notification.body.to_owned(),
            tag,
            data: serde_json::json!({
                "notificationId": notification.id,
                "type": notification.notification_type,
                "payload": notification.payload,
            }),
        }
    }
}

#[async_trait::async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, user_id: &str, message: &PushMessage) -> anyhow::Result<()>;
}

/// Sender used when no push transport is configured: the message is only logged.
#[derive(Debug, Clone, Default)]
pub struct TracingPushSender;

#[async_trait::async_trait]
impl PushSender for TracingPushSender {
    async fn send(&self, user_id: &str, message: &PushMessage) -> anyhow::Result<()> {
        tracing::info!(
            user_id,
            tag = %message.tag,
            title = %message.title,
            "push notification"
        );

        Ok(())
    }
}
