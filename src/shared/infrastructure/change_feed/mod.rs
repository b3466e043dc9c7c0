// Realtime invalidation signals.
//
// A signal only says that data for a table, scoped to a branch, may be stale. It never
// carries rows; subscribers re-fetch through the data store ports.

use crate::shared::core::branch::Branch;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTable {
    Appointments,
    Clients,
    Promotions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSignal {
    pub table: ChangeTable,
    /// `None` affects every branch.
    pub branch: Option<Branch>,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeSignal>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, signal: ChangeSignal) {
        // No subscribers is not an error.
        let _ = self.sender.send(signal);
    }

    pub fn subscribe(&self, branch: Branch) -> ChangeSubscription {
        ChangeSubscription {
            branch,
            receiver: self.sender.subscribe(),
        }
    }
}

pub struct ChangeSubscription {
    branch: Branch,
    receiver: broadcast::Receiver<ChangeSignal>,
}

impl ChangeSubscription {
    /// Waits for the next signal relevant to this subscription's branch.
    /// Returns `None` once the feed is gone.
    pub async fn next(&mut self) -> Option<ChangeSignal> {
        loop {
            match self.receiver.recv().await {
                Ok(signal) if signal.branch.is_none_or(|b| b == self.branch) => {
                    return Some(signal);
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => return Some(self.lagged(skipped)),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of `next`, used to drain pending signals.
    pub fn try_next(&mut self) -> Option<ChangeSignal> {
        loop {
            match self.receiver.try_recv() {
                Ok(signal) if signal.branch.is_none_or(|b| b == self.branch) => {
                    return Some(signal);
                }
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    return Some(self.lagged(skipped));
                }
                Err(_) => return None,
            }
        }
    }

    /// The skipped signals may have held an insert, so a lag reads as one.
    fn lagged(&self, skipped: u64) -> ChangeSignal {
        tracing::warn!(skipped, branch = %self.branch, "change feed lagged");
        ChangeSignal {
            table: ChangeTable::Appointments,
            branch: Some(self.branch),
            kind: ChangeKind::Inserted,
        }
    }
}
