use std::cmp::Reverse;

use tracing::{debug, instrument};
use crate::actor_framework::{id_sequence, Filter, ResourceClient};
use crate::domain::{Notification, NotificationCreate};
use crate::notification_actor::NotificationError;

/// Client for the notification feed actor.
#[derive(Clone)]
pub struct NotificationClient {
    inner: ResourceClient<Notification>,
}

impl_basic_client!(NotificationClient, Notification, NotificationError, notification);

impl NotificationClient {
    #[instrument(skip(self, notification), fields(recipient = %notification.recipient, title = %notification.title))]
    pub async fn notify(&self, notification: NotificationCreate) -> Result<String, NotificationError> {
        debug!("Sending request");
        self.inner.create(notification).await.map_err(NotificationError::from)
    }

    /// The recipient's feed, newest first.
    #[instrument(skip(self))]
    pub async fn list_for(&self, recipient: String) -> Result<Vec<Notification>, NotificationError> {
        debug!("Sending request");
        let filter: Filter<Notification> = Box::new(move |n: &Notification| n.recipient == recipient);
        let mut feed = self.inner.list(Some(filter)).await?;
        feed.sort_by_key(|n| Reverse((n.created_at, id_sequence(&n.id))));
        Ok(feed)
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, recipient: String) -> Result<usize, NotificationError> {
        debug!("Sending request");
        let filter: Filter<Notification> = Box::new(move |n: &Notification| n.recipient == recipient && !n.read);
        Ok(self.inner.list(Some(filter)).await?.len())
    }

    /// Returns false if the notification was already read.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: String) -> Result<bool, NotificationError> {
        debug!("Sending request");
        self.inner.perform_action(id, ()).await.map_err(NotificationError::from)
    }

    /// Returns how many notifications changed.
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, recipient: String) -> Result<usize, NotificationError> {
        debug!("Sending request");
        let mut changed = 0;
        for notification in self.list_for(recipient).await? {
            if !notification.read && self.inner.perform_action(notification.id, ()).await? {
                changed += 1;
            }
        }
        Ok(changed)
    }
}
