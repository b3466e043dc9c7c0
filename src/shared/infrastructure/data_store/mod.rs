// Ports onto the relational data store holding barbers, clients, appointments and promotions.
//
// Purpose
// - Describe the query shapes the booking engine needs, without committing to a database.
//
// Responsibilities
// - Every read distinguishes "no rows" (`Ok(None)` or an empty vector) from a failed fetch (`Err`).
// - Inserts of a slot-holding appointment fail with `UniqueViolation` when the
//   (barber, date, time) slot is already held. Implementations must enforce this at the
//   storage layer.
//
// Testing guidance
// - Use `in_memory::InMemoryDataStore`, which can be taken offline or slowed down.

use crate::modules::booking::core::model::{
    Appointment, AppointmentStatus, Barber, Client, Promotion,
};
use crate::shared::core::branch::Branch;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarberFilter {
    pub branch: Option<Branch>,
    pub offers_free_cut: Option<bool>,
}

impl BarberFilter {
    pub fn matches(&self, barber: &Barber) -> bool {
        self.branch.is_none_or(|b| barber.branch == b)
            && self
                .offers_free_cut
                .is_none_or(|f| barber.offers_free_birthday_cut == f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub barber_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub client_id: Option<String>,
    pub branch: Option<Branch>,
    pub status_in: Option<Vec<AppointmentStatus>>,
}

impl AppointmentFilter {
    pub fn barber(mut self, barber_id: impl Into<String>) -> Self {
        self.barber_id = Some(barber_id.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn branch(mut self, branch: Branch) -> Self {
        self.branch = Some(branch);
        self
    }

    pub fn holding_slot(mut self) -> Self {
        self.status_in = Some(AppointmentStatus::HOLDING.to_vec());
        self
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.barber_id
            .as_ref()
            .is_none_or(|id| &appointment.barber_id == id)
            && self.date.is_none_or(|d| appointment.date == d)
            && self.date_from.is_none_or(|d| appointment.date >= d)
            && self
                .client_id
                .as_ref()
                .is_none_or(|id| &appointment.client_id == id)
            && self.branch.is_none_or(|b| appointment.branch == b)
            && self
                .status_in
                .as_ref()
                .is_none_or(|statuses| statuses.contains(&appointment.status))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountFilter {
    pub client_id: String,
    pub date_from: NaiveDate,
    pub status_in: Vec<AppointmentStatus>,
}

impl From<&CountFilter> for AppointmentFilter {
    fn from(filter: &CountFilter) -> Self {
        AppointmentFilter {
            client_id: Some(filter.client_id.clone()),
            date_from: Some(filter.date_from),
            status_in: Some(filter.status_in.clone()),
            ..Default::default()
        }
    }
}

/// Fields staff or the booking flow may change on an existing client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub blocked: Option<bool>,
    /// Counts one more completed visit.
    pub record_visit: bool,
}

impl ClientUpdate {
    pub fn apply(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
        if let Some(blocked) = self.blocked {
            client.blocked = blocked;
        }
        if self.record_visit {
            client.visit_count = client.visit_count.saturating_add(1);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionFilter {
    pub branch: Option<Branch>,
    pub active_on: Option<NaiveDate>,
}

impl PromotionFilter {
    pub fn matches(&self, promotion: &Promotion) -> bool {
        self.branch.is_none_or(|b| promotion.branch == b)
            && self.active_on.is_none_or(|d| promotion.is_visible_on(d))
    }
}

#[async_trait]
pub trait BarberDirectory: Send + Sync {
    async fn list_barbers(&self, filter: &BarberFilter) -> Result<Vec<Barber>, StoreError>;
    async fn get_barber(&self, barber_id: &str) -> Result<Option<Barber>, StoreError>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, StoreError>;
    async fn count_appointments(&self, filter: &CountFilter) -> Result<u32, StoreError>;
    async fn get_appointment(&self, appointment_id: &str)
    -> Result<Option<Appointment>, StoreError>;
    async fn insert_appointment(&self, appointment: Appointment) -> Result<(), StoreError>;
    /// Returns `false` when there was nothing to delete.
    async fn delete_appointment(&self, appointment_id: &str) -> Result<bool, StoreError>;
    async fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError>;
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn upsert_client(&self, client: Client) -> Result<(), StoreError>;
    async fn get_client(&self, client_id: &str) -> Result<Option<Client>, StoreError>;
    async fn update_client(
        &self,
        client_id: &str,
        update: ClientUpdate,
    ) -> Result<Option<Client>, StoreError>;
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError>;
    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Client>, StoreError>;
}

#[async_trait]
pub trait PromotionStore: Send + Sync {
    async fn list_promotions(&self, filter: &PromotionFilter) -> Result<Vec<Promotion>, StoreError>;
    async fn insert_promotion(&self, promotion: Promotion) -> Result<(), StoreError>;
    async fn delete_promotion(&self, promotion_id: &str) -> Result<bool, StoreError>;
}

/// Every data store port at once, for handlers that need several of them.
pub trait DataStore: BarberDirectory + AppointmentStore + ClientStore + PromotionStore {}

impl<T> DataStore for T where T: BarberDirectory + AppointmentStore + ClientStore + PromotionStore {}

pub mod in_memory;
