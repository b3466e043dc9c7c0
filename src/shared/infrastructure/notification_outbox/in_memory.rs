use crate::shared::infrastructure::notification_outbox::{
    NotificationOutbox, NotificationRow, NotifyError,
};
use std::collections::HashSet;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryNotificationOutbox {
    pub rows: Mutex<Vec<NotificationRow>>,
    seen: Mutex<HashSet<String>>,
    is_offline: bool,
}

impl InMemoryNotificationOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }
}

#[async_trait::async_trait]
impl NotificationOutbox for InMemoryNotificationOutbox {
    async fn enqueue(&self, row: NotificationRow) -> Result<(), NotifyError> {
        if self.is_offline {
            return Err(NotifyError::Delivery("Messaging hand-off offline".into()));
        }
        {
            let mut seen = self.seen.lock().await;
            if !seen.insert(row.appointment_id.clone()) {
                return Err(NotifyError::Duplicate {
                    appointment_id: row.appointment_id,
                });
            }
        }
        self.rows.lock().await.push(row);
        Ok(())
    }
}
