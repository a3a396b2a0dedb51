use super::ConcurrentObserver;
use crate::error::ObserverError;
use fieldsim_core::{FarmProfile, FarmProfileUpdate, Notification, NotificationIcon};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    #[serde(flatten)]
    pub notification: Notification,
    pub icon: NotificationIcon,
}

impl From<Notification> for NotificationView {
    fn from(notification: Notification) -> Self {
        NotificationView {
            icon: notification.kind.icon(),
            notification,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationFeed {
    pub unread: usize,
    pub notifications: Vec<NotificationView>,
}

/// Notifications and the farm profile
#[derive(Clone)]
pub struct AccountObserver {
    inner: Arc<ConcurrentObserver>,
}

impl AccountObserver {
    pub fn new(inner: Arc<ConcurrentObserver>) -> Self {
        AccountObserver { inner }
    }

    pub async fn notifications(&self) -> NotificationFeed {
        let state = self.inner.state.read().await;
        let log = state.notifications();
        NotificationFeed {
            unread: log.unread_count(),
            notifications: log
                .entries()
                .iter()
                .cloned()
                .map(NotificationView::from)
                .collect(),
        }
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<NotificationView, ObserverError> {
        let notification = self
            .inner
            .state
            .write()
            .await
            .mark_notification_read(notification_id)?;
        debug!(notification_id = notification_id, "Marked notification read");
        Ok(notification.into())
    }

    pub async fn profile(&self) -> FarmProfile {
        self.inner.state.read().await.profile().clone()
    }

    pub async fn update_profile(&self, update: FarmProfileUpdate) -> FarmProfile {
        let mut state = self.inner.state.write().await;
        let profile = state.update_profile(update).clone();
        info!(farm = %profile.farm_name, "Updated farm profile");
        profile
    }
}
