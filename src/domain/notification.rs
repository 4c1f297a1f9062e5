use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Order,
    Promo,
    System,
}

/// An entry in a user's notification feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub recipient: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// Payload for pushing a notification.
#[derive(Debug, Clone)]
pub struct NotificationCreate {
    pub recipient: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NotificationCreate {
    pub fn order(recipient: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            kind: NotificationKind::Order,
            title: title.into(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    pub fn promo(recipient: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Promo,
            ..Self::order(recipient, title, body)
        }
    }
}
