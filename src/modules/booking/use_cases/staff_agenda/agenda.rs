// Live appointment list for the staff view of one branch.
//
// The agenda re-fetches on every relevant change signal instead of patching rows. An
// inserted appointment also raises the alert flag, which the view turns into an audible
// cue and clears with `take_alert`.

use crate::modules::booking::core::model::Appointment;
use crate::shared::core::branch::Branch;
use crate::shared::core::request_guard::RequestGuard;
use crate::shared::infrastructure::change_feed::{
    ChangeFeed, ChangeKind, ChangeSignal, ChangeSubscription, ChangeTable,
};
use crate::shared::infrastructure::data_store::{AppointmentFilter, BarberFilter, DataStore, StoreError};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaEntry {
    pub appointment: Appointment,
    pub barber_name: String,
    pub client_name: String,
    pub client_phone: String,
}

pub struct StaffAgenda<TStore>
where
    TStore: DataStore + 'static,
{
    store: Arc<TStore>,
    branch: Branch,
    subscription: Mutex<ChangeSubscription>,
    entries: RwLock<Vec<AgendaEntry>>,
    guard: RequestGuard,
    alert: AtomicBool,
}

impl<TStore> StaffAgenda<TStore>
where
    TStore: DataStore + 'static,
{
    pub fn new(store: Arc<TStore>, feed: &ChangeFeed, branch: Branch) -> Self {
        Self {
            store,
            branch,
            subscription: Mutex::new(feed.subscribe(branch)),
            entries: RwLock::new(Vec::new()),
            guard: RequestGuard::new(),
            alert: AtomicBool::new(false),
        }
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub async fn entries(&self) -> Vec<AgendaEntry> {
        self.entries.read().await.clone()
    }

    /// Returns whether a new booking arrived since the last call, and clears the flag.
    pub fn take_alert(&self) -> bool {
        self.alert.swap(false, Ordering::SeqCst)
    }

    /// Reloads upcoming slot-holding appointments of the branch, ordered by date and time.
    pub async fn refresh(&self, today: NaiveDate) -> Result<(), StoreError> {
        let ticket = self.guard.issue();
        let appointments = self
            .store
            .list_appointments(
                &AppointmentFilter::default()
                    .branch(self.branch)
                    .from_date(today)
                    .holding_slot(),
            )
            .await?;
        let barbers: HashMap<String, String> = self
            .store
            .list_barbers(&BarberFilter {
                branch: Some(self.branch),
                ..Default::default()
            })
            .await?
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect();

        let mut entries = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            let (client_name, client_phone) = match self.store.get_client(&appointment.client_id).await? {
                Some(client) => (client.name, client.phone),
                None => (appointment.client_id.clone(), String::new()),
            };
            let barber_name = barbers
                .get(&appointment.barber_id)
                .cloned()
                .unwrap_or_else(|| appointment.barber_id.clone());
            entries.push(AgendaEntry {
                appointment,
                barber_name,
                client_name,
                client_phone,
            });
        }

        if !self.guard.is_current(ticket) {
            tracing::debug!(branch = %self.branch, "discarding stale agenda");
            return Ok(());
        }
        tracing::debug!(branch = %self.branch, count = entries.len(), "agenda refreshed");
        *self.entries.write().await = entries;
        Ok(())
    }

    /// Handles every signal already queued, refreshing once if any of them matters.
    /// Returns the number of relevant signals.
    pub async fn apply_pending(&self, today: NaiveDate) -> Result<usize, StoreError> {
        let mut relevant = 0;
        {
            let mut subscription = self.subscription.lock().await;
            while let Some(signal) = subscription.try_next() {
                if self.note(signal) {
                    relevant += 1;
                }
            }
        }
        if relevant > 0 {
            self.refresh(today).await?;
        }
        Ok(relevant)
    }

    /// Waits for the next relevant signal and refreshes. `None` once the feed is closed.
    pub async fn wait_for_change(&self, today: NaiveDate) -> Option<Result<(), StoreError>> {
        loop {
            let signal = self.subscription.lock().await.next().await?;
            if self.note(signal) {
                return Some(self.refresh(today).await);
            }
        }
    }

    fn note(&self, signal: ChangeSignal) -> bool {
        match signal.table {
            ChangeTable::Appointments => {
                if signal.kind == ChangeKind::Inserted {
                    self.alert.store(true, Ordering::SeqCst);
                }
                true
            }
            ChangeTable::Clients => true,
            ChangeTable::Promotions => false,
        }
    }
}
