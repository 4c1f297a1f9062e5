use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{Notification, NotificationCreate};
use super::error::NotificationError;

/// Marking as read is the only action; the result says whether anything changed.
impl Entity for Notification {
    type Id = String;
    type CreatePayload = NotificationCreate;
    type Patch = Infallible;
    type Action = ();
    type ActionResult = bool;
    type Error = NotificationError;

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, params: NotificationCreate) -> Result<Self, NotificationError> {
        if params.recipient.trim().is_empty() {
            return Err(NotificationError::ValidationError("recipient is required".to_string()));
        }
        Ok(Self {
            id,
            recipient: params.recipient,
            kind: params.kind,
            title: params.title,
            body: params.body,
            created_at: params.created_at,
            read: false,
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), NotificationError> {
        match patch {}
    }

    fn handle_action(&mut self, _action: ()) -> Result<bool, NotificationError> {
        let changed = !self.read;
        self.read = true;
        Ok(changed)
    }
}
