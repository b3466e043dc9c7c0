// Staff booking of the free birthday cut.
//
// Unlike the client flow, staff may pick any date from today onwards. The barber must
// offer the free cut, the client must be eligible today and not blocked, and the same
// conflict guard protects the slot and the client's day. The appointment is stored as
// confirmed straight away.

use crate::modules::booking::core::birthday::evaluate_birthday;
use crate::modules::booking::core::conflict_guard::{Conflict, ConflictGuard, GuardOutcome};
use crate::modules::booking::core::model::{Appointment, AppointmentStatus};
use crate::modules::booking::core::policy::BookingPolicy;
use crate::modules::booking::core::service::{DurationClass, Service};
use crate::modules::booking::core::slots::generate_slots;
use crate::modules::booking::use_cases::book_appointment::decision::DecideError;
use crate::modules::booking::use_cases::book_birthday_cut::command::BookBirthdayCut;
use crate::modules::booking::use_cases::staff_error::StaffError;
use crate::shared::infrastructure::data_store::{DataStore, StoreError};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub struct BookBirthdayCutHandler<TStore>
where
    TStore: DataStore + 'static,
{
    store: Arc<TStore>,
    guard: ConflictGuard<TStore>,
    policy: BookingPolicy,
}

impl<TStore> BookBirthdayCutHandler<TStore>
where
    TStore: DataStore + 'static,
{
    pub fn new(store: Arc<TStore>, policy: BookingPolicy) -> Self {
        Self {
            guard: ConflictGuard::new(store.clone(), policy.max_active_appointments_per_client),
            store,
            policy,
        }
    }

    pub async fn handle(
        &self,
        command: BookBirthdayCut,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Appointment, StaffError> {
        if command.date < today {
            return Err(StaffError::Validation(
                "La fecha no puede ser anterior a hoy.".into(),
            ));
        }
        if !generate_slots(DurationClass::Ordinary, &self.policy.slots).contains(&command.time) {
            return Err(StaffError::Validation(
                DecideError::SlotNotOffered(command.time).user_message(),
            ));
        }

        let barber = self
            .store
            .get_barber(&command.barber_id)
            .await?
            .ok_or_else(|| StaffError::NotFound(format!("barber {}", command.barber_id)))?;
        if !barber.can_perform(Service::FreeBirthdayCut) {
            return Err(StaffError::NotEligible(
                DecideError::ServiceNotOffered(Service::FreeBirthdayCut).user_message(),
            ));
        }

        let client = self
            .store
            .get_client(&command.client_id)
            .await?
            .ok_or_else(|| StaffError::NotFound(format!("client {}", command.client_id)))?;
        if client.blocked {
            return Err(StaffError::NotEligible(DecideError::ClientBlocked.user_message()));
        }
        let promotion = evaluate_birthday(
            client.birth_date,
            client.visit_count,
            today,
            self.policy.birthday_visit_threshold,
        );
        if !promotion.is_eligible() {
            return Err(StaffError::NotEligible(
                DecideError::NotBirthdayEligible.user_message(),
            ));
        }

        if let GuardOutcome::Conflict(conflict) =
            self.guard.check_client_day(&client.id, command.date).await?
        {
            return Err(StaffError::Conflict(conflict));
        }
        if let GuardOutcome::Conflict(conflict) = self
            .guard
            .check_slot(&barber.id, command.date, command.time)
            .await?
        {
            return Err(StaffError::Conflict(conflict));
        }

        let appointment = Appointment {
            id: Uuid::now_v7().to_string(),
            client_id: client.id.clone(),
            barber_id: barber.id.clone(),
            branch: barber.branch,
            service: Service::FreeBirthdayCut,
            date: command.date,
            time: command.time,
            notes: command.notes.trim().to_string(),
            status: AppointmentStatus::Confirmed,
            created_at: now,
            is_birthday_booking: true,
        };
        match self.store.insert_appointment(appointment.clone()).await {
            Ok(()) => {}
            Err(StoreError::UniqueViolation(_)) => {
                return Err(StaffError::Conflict(Conflict::SlotTaken {
                    barber_id: barber.id,
                    date: command.date,
                    time: command.time,
                }));
            }
            Err(e) => return Err(e.into()),
        }
        tracing::info!(
            appointment_id = %appointment.id,
            client_id = %appointment.client_id,
            barber_id = %appointment.barber_id,
            "birthday cut booked by staff"
        );
        Ok(appointment)
    }
}
