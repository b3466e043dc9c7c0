// Booking conflict guard.
//
// The last check before an appointment is written. It always reads fresh state: the slot
// list a client picked from may be stale by the time they submit.
//
// 1. Client limit: slot-holding appointments of the client dated today or later must stay
//    below the configured maximum.
// 2. Exact slot: no slot-holding appointment may exist for the same barber, date and time.

use crate::modules::booking::core::model::AppointmentStatus;
use crate::modules::booking::core::notification::format_date_es;
use crate::shared::infrastructure::data_store::{
    AppointmentFilter, AppointmentStore, BarberDirectory, CountFilter, StoreError,
};
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingAppointment {
    pub appointment_id: String,
    pub barber_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    ClientLimitReached {
        limit: u32,
        existing: Option<ExistingAppointment>,
    },
    SlotTaken {
        barber_id: String,
        date: NaiveDate,
        time: NaiveTime,
    },
}

impl Conflict {
    pub fn user_message(&self) -> String {
        match self {
            Conflict::ClientLimitReached {
                existing: Some(existing),
                ..
            } => format!(
                "Ya tienes una cita agendada con {} para el {} a las {}. Si deseas agendar otra, primero debes cancelar la cita actual.",
                existing.barber_name,
                format_date_es(existing.date),
                existing.time.format("%H:%M"),
            ),
            Conflict::ClientLimitReached { existing: None, .. } => {
                "Ya tienes una cita agendada. Si deseas agendar otra, primero debes cancelar la cita actual.".to_string()
            }
            Conflict::SlotTaken { date, time, .. } => format!(
                "La hora {} del {} ya fue tomada. Por favor elige otra hora.",
                time.format("%H:%M"),
                format_date_es(*date),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Clear,
    Conflict(Conflict),
}

pub struct ConflictGuard<TStore>
where
    TStore: AppointmentStore + BarberDirectory + 'static,
{
    store: Arc<TStore>,
    max_active_appointments: u32,
}

impl<TStore> ConflictGuard<TStore>
where
    TStore: AppointmentStore + BarberDirectory + 'static,
{
    pub fn new(store: Arc<TStore>, max_active_appointments: u32) -> Self {
        Self {
            store,
            max_active_appointments,
        }
    }

    pub async fn check(
        &self,
        client_id: &str,
        barber_id: &str,
        date: NaiveDate,
        time: NaiveTime,
        today: NaiveDate,
    ) -> Result<GuardOutcome, StoreError> {
        match self.check_client_limit(client_id, today).await? {
            GuardOutcome::Clear => self.check_slot(barber_id, date, time).await,
            conflict => Ok(conflict),
        }
    }

    pub async fn check_client_limit(
        &self,
        client_id: &str,
        today: NaiveDate,
    ) -> Result<GuardOutcome, StoreError> {
        let active = self
            .store
            .count_appointments(&CountFilter {
                client_id: client_id.to_string(),
                date_from: today,
                status_in: AppointmentStatus::HOLDING.to_vec(),
            })
            .await?;
        if active < self.max_active_appointments {
            return Ok(GuardOutcome::Clear);
        }
        let existing = self
            .describe_first(AppointmentFilter::default().client(client_id).from_date(today))
            .await?;
        Ok(GuardOutcome::Conflict(Conflict::ClientLimitReached {
            limit: self.max_active_appointments,
            existing,
        }))
    }

    /// Staff variant of the client limit: at most one slot-holding appointment per day.
    pub async fn check_client_day(
        &self,
        client_id: &str,
        date: NaiveDate,
    ) -> Result<GuardOutcome, StoreError> {
        let existing = self
            .describe_first(AppointmentFilter::default().client(client_id).on(date))
            .await?;
        Ok(match existing {
            Some(existing) => GuardOutcome::Conflict(Conflict::ClientLimitReached {
                limit: 1,
                existing: Some(existing),
            }),
            None => GuardOutcome::Clear,
        })
    }

    pub async fn check_slot(
        &self,
        barber_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<GuardOutcome, StoreError> {
        let holders = self
            .store
            .list_appointments(&AppointmentFilter::default().barber(barber_id).on(date).holding_slot())
            .await?;
        if holders.iter().any(|a| a.time == time) {
            return Ok(GuardOutcome::Conflict(Conflict::SlotTaken {
                barber_id: barber_id.to_string(),
                date,
                time,
            }));
        }
        Ok(GuardOutcome::Clear)
    }

    async fn describe_first(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Option<ExistingAppointment>, StoreError> {
        let upcoming = self.store.list_appointments(&filter.holding_slot()).await?;
        let Some(first) = upcoming.into_iter().next() else {
            return Ok(None);
        };
        let barber_name = self
            .store
            .get_barber(&first.barber_id)
            .await?
            .map(|b| b.name)
            .unwrap_or_else(|| first.barber_id.clone());
        Ok(Some(ExistingAppointment {
            appointment_id: first.id,
            barber_name,
            date: first.date,
            time: first.time,
        }))
    }
}
