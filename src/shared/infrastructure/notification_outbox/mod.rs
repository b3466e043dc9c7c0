use crate::modules::booking::core::notification::BarberNotification;
use async_trait::async_trait;
use thiserror::Error;

/// One barber hand-off, ready to be opened by whoever delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRow {
    pub appointment_id: String,
    pub deep_link: String,
    pub payload: BarberNotification,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("duplicate notification for appointment {appointment_id}")]
    Duplicate { appointment_id: String },

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Delivery is best effort: callers log a `NotifyError` and move on.
#[async_trait]
pub trait NotificationOutbox: Send + Sync {
    async fn enqueue(&self, row: NotificationRow) -> Result<(), NotifyError>;
}

pub mod in_memory;
