// In memory implementation of the data store ports.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep barbers, clients, appointments and promotions in memory.
// - Enforce the (barber, date, time) uniqueness of slot-holding appointments on insert.
// - Publish invalidation signals on the change feed when one is attached.

use crate::modules::booking::core::model::{
    Appointment, AppointmentStatus, Barber, Client, Promotion,
};
use crate::shared::infrastructure::change_feed::{ChangeFeed, ChangeKind, ChangeSignal, ChangeTable};
use crate::shared::infrastructure::data_store::{
    AppointmentFilter, AppointmentStore, BarberDirectory, BarberFilter, ClientStore, ClientUpdate,
    CountFilter, PromotionFilter, PromotionStore, StoreError,
};
use crate::shared::core::branch::Branch;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tokio::time::{Duration, sleep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Barbers,
    Appointments,
    Clients,
    Promotions,
}

#[derive(Default)]
pub struct InMemoryDataStore {
    barbers: RwLock<Vec<Barber>>,
    appointments: RwLock<Vec<Appointment>>,
    clients: RwLock<HashMap<String, Client>>,
    promotions: RwLock<Vec<Promotion>>,
    change_feed: Option<ChangeFeed>,
    is_offline: bool,
    writes_offline: bool,
    offline_tables: HashSet<Table>,
    delay_insert_ms: AtomicU64,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_change_feed(mut self, change_feed: ChangeFeed) -> Self {
        self.change_feed = Some(change_feed);
        self
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Reads keep working, every write fails.
    pub fn toggle_writes_offline(&mut self) {
        self.writes_offline = !self.writes_offline;
    }

    pub fn toggle_table_offline(&mut self, table: Table) {
        if !self.offline_tables.remove(&table) {
            self.offline_tables.insert(table);
        }
    }

    /// Widens the window between a conflict check and the insert that follows it.
    pub fn set_delay_insert_ms(&self, ms: u64) {
        self.delay_insert_ms.store(ms, Ordering::SeqCst);
    }

    pub async fn add_barber(&self, barber: Barber) {
        self.barbers.write().await.push(barber);
    }

    pub async fn add_client(&self, client: Client) {
        self.clients.write().await.insert(client.id.clone(), client);
    }

    pub async fn add_appointment(&self, appointment: Appointment) {
        self.appointments.write().await.push(appointment);
    }

    pub async fn appointment_count(&self) -> usize {
        self.appointments.read().await.len()
    }

    fn ensure_readable(&self, table: Table) -> Result<(), StoreError> {
        if self.is_offline || self.offline_tables.contains(&table) {
            return Err(StoreError::Backend("Data store offline".into()));
        }
        Ok(())
    }

    fn ensure_writable(&self, table: Table) -> Result<(), StoreError> {
        self.ensure_readable(table)?;
        if self.writes_offline {
            return Err(StoreError::Backend("Data store is read only".into()));
        }
        Ok(())
    }

    fn publish(&self, table: ChangeTable, branch: Option<Branch>, kind: ChangeKind) {
        if let Some(feed) = &self.change_feed {
            feed.publish(ChangeSignal {
                table,
                branch,
                kind,
            });
        }
    }
}

#[async_trait]
impl BarberDirectory for InMemoryDataStore {
    async fn list_barbers(&self, filter: &BarberFilter) -> Result<Vec<Barber>, StoreError> {
        self.ensure_readable(Table::Barbers)?;
        let guard = self.barbers.read().await;
        let mut barbers: Vec<Barber> = guard.iter().filter(|b| filter.matches(b)).cloned().collect();
        barbers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(barbers)
    }

    async fn get_barber(&self, barber_id: &str) -> Result<Option<Barber>, StoreError> {
        self.ensure_readable(Table::Barbers)?;
        Ok(self
            .barbers
            .read()
            .await
            .iter()
            .find(|b| b.id == barber_id)
            .cloned())
    }
}

#[async_trait]
impl AppointmentStore for InMemoryDataStore {
    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, StoreError> {
        self.ensure_readable(Table::Appointments)?;
        let guard = self.appointments.read().await;
        let mut items: Vec<Appointment> = guard.iter().filter(|a| filter.matches(a)).cloned().collect();
        items.sort_by_key(|a| (a.date, a.time));
        Ok(items)
    }

    async fn count_appointments(&self, filter: &CountFilter) -> Result<u32, StoreError> {
        self.ensure_readable(Table::Appointments)?;
        let filter = AppointmentFilter::from(filter);
        let guard = self.appointments.read().await;
        Ok(guard.iter().filter(|a| filter.matches(a)).count() as u32)
    }

    async fn get_appointment(
        &self,
        appointment_id: &str,
    ) -> Result<Option<Appointment>, StoreError> {
        self.ensure_readable(Table::Appointments)?;
        Ok(self
            .appointments
            .read()
            .await
            .iter()
            .find(|a| a.id == appointment_id)
            .cloned())
    }

    async fn insert_appointment(&self, appointment: Appointment) -> Result<(), StoreError> {
        self.ensure_writable(Table::Appointments)?;
        let delay = self.delay_insert_ms.load(Ordering::SeqCst);
        if delay > 0 {
            sleep(Duration::from_millis(delay)).await;
        }
        let branch = appointment.branch;
        {
            let mut guard = self.appointments.write().await;
            if guard.iter().any(|a| a.id == appointment.id) {
                return Err(StoreError::UniqueViolation(format!(
                    "appointment {} already exists",
                    appointment.id
                )));
            }
            let slot_held = appointment.status.holds_slot()
                && guard.iter().any(|a| {
                    a.status.holds_slot()
                        && a.barber_id == appointment.barber_id
                        && a.date == appointment.date
                        && a.time == appointment.time
                });
            if slot_held {
                return Err(StoreError::UniqueViolation(format!(
                    "slot {} {} {} already held",
                    appointment.barber_id, appointment.date, appointment.time
                )));
            }
            guard.push(appointment);
        }
        self.publish(ChangeTable::Appointments, Some(branch), ChangeKind::Inserted);
        Ok(())
    }

    async fn delete_appointment(&self, appointment_id: &str) -> Result<bool, StoreError> {
        self.ensure_writable(Table::Appointments)?;
        let removed = {
            let mut guard = self.appointments.write().await;
            let position = guard.iter().position(|a| a.id == appointment_id);
            position.map(|index| guard.remove(index))
        };
        match removed {
            Some(appointment) => {
                self.publish(
                    ChangeTable::Appointments,
                    Some(appointment.branch),
                    ChangeKind::Deleted,
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        self.ensure_writable(Table::Appointments)?;
        let updated = {
            let mut guard = self.appointments.write().await;
            guard.iter_mut().find(|a| a.id == appointment_id).map(|a| {
                a.status = status;
                a.clone()
            })
        };
        if let Some(appointment) = &updated {
            self.publish(
                ChangeTable::Appointments,
                Some(appointment.branch),
                ChangeKind::Updated,
            );
        }
        Ok(updated)
    }
}

#[async_trait]
impl ClientStore for InMemoryDataStore {
    async fn upsert_client(&self, client: Client) -> Result<(), StoreError> {
        self.ensure_writable(Table::Clients)?;
        let branch = client.branch;
        let existed = self
            .clients
            .write()
            .await
            .insert(client.id.clone(), client)
            .is_some();
        let kind = if existed {
            ChangeKind::Updated
        } else {
            ChangeKind::Inserted
        };
        self.publish(ChangeTable::Clients, branch, kind);
        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>, StoreError> {
        self.ensure_readable(Table::Clients)?;
        Ok(self.clients.read().await.get(client_id).cloned())
    }

    async fn update_client(
        &self,
        client_id: &str,
        update: ClientUpdate,
    ) -> Result<Option<Client>, StoreError> {
        self.ensure_writable(Table::Clients)?;
        let updated = {
            let mut guard = self.clients.write().await;
            guard.get_mut(client_id).map(|client| {
                update.apply(client);
                client.clone()
            })
        };
        if let Some(client) = &updated {
            self.publish(ChangeTable::Clients, client.branch, ChangeKind::Updated);
        }
        Ok(updated)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        self.ensure_readable(Table::Clients)?;
        let mut clients: Vec<Client> = self.clients.read().await.values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Client>, StoreError> {
        self.ensure_readable(Table::Clients)?;
        Ok(self
            .clients
            .read()
            .await
            .values()
            .find(|c| c.email.eq_ignore_ascii_case(email) || c.phone == phone)
            .cloned())
    }
}

#[async_trait]
impl PromotionStore for InMemoryDataStore {
    async fn list_promotions(&self, filter: &PromotionFilter) -> Result<Vec<Promotion>, StoreError> {
        self.ensure_readable(Table::Promotions)?;
        let guard = self.promotions.read().await;
        let mut items: Vec<Promotion> = guard.iter().filter(|p| filter.matches(p)).cloned().collect();
        items.sort_by(|a, b| b.starts_on.cmp(&a.starts_on));
        Ok(items)
    }

    async fn insert_promotion(&self, promotion: Promotion) -> Result<(), StoreError> {
        self.ensure_writable(Table::Promotions)?;
        let branch = promotion.branch;
        {
            let mut guard = self.promotions.write().await;
            if guard.iter().any(|p| p.id == promotion.id) {
                return Err(StoreError::UniqueViolation(format!(
                    "promotion {} already exists",
                    promotion.id
                )));
            }
            guard.push(promotion);
        }
        self.publish(ChangeTable::Promotions, Some(branch), ChangeKind::Inserted);
        Ok(())
    }

    async fn delete_promotion(&self, promotion_id: &str) -> Result<bool, StoreError> {
        self.ensure_writable(Table::Promotions)?;
        let removed = {
            let mut guard = self.promotions.write().await;
            let position = guard.iter().position(|p| p.id == promotion_id);
            position.map(|index| guard.remove(index))
        };
        if let Some(promotion) = &removed {
            self.publish(
                ChangeTable::Promotions,
                Some(promotion.branch),
                ChangeKind::Deleted,
            );
        }
        Ok(removed.is_some())
    }
}
