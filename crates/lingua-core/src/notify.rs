use std::time::Duration;

use lingua_types::Notification;
use uuid::Uuid;

/// How long a notification stays visible. Expiry is per item; the owner
/// of the bus schedules one timer per push and calls [`NotificationBus::expire`].
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(2500);

/// Transient user-facing messages, newest first.
#[derive(Debug, Default)]
pub struct NotificationBus {
    items: Vec<Notification>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
        };
        self.items.insert(0, notification.clone());
        notification
    }

    /// Remove one notification; other items are unaffected.
    pub fn expire(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
