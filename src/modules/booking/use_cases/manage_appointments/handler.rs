use crate::modules::booking::core::model::{Appointment, AppointmentStatus};
use crate::modules::booking::use_cases::staff_error::StaffError;
use crate::shared::infrastructure::data_store::{AppointmentStore, ClientStore, ClientUpdate};
use std::sync::Arc;

pub struct ManageAppointmentsHandler<TStore>
where
    TStore: AppointmentStore + ClientStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ManageAppointmentsHandler<TStore>
where
    TStore: AppointmentStore + ClientStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn confirm(&self, appointment_id: &str) -> Result<Appointment, StaffError> {
        self.transition(appointment_id, AppointmentStatus::Confirmed).await
    }

    pub async fn cancel(&self, appointment_id: &str) -> Result<Appointment, StaffError> {
        self.transition(appointment_id, AppointmentStatus::Cancelled).await
    }

    pub async fn mark_no_show(&self, appointment_id: &str) -> Result<Appointment, StaffError> {
        self.transition(appointment_id, AppointmentStatus::NoShow).await
    }

    /// Closes the visit and counts it for the client's birthday threshold.
    pub async fn complete(&self, appointment_id: &str) -> Result<Appointment, StaffError> {
        let appointment = self
            .transition(appointment_id, AppointmentStatus::Completed)
            .await?;
        let update = ClientUpdate {
            record_visit: true,
            ..Default::default()
        };
        if self
            .store
            .update_client(&appointment.client_id, update)
            .await?
            .is_none()
        {
            tracing::warn!(client_id = %appointment.client_id, "completed visit for unknown client");
        }
        Ok(appointment)
    }

    /// Deletes the appointment so the slot can be booked again.
    pub async fn free_slot(&self, appointment_id: &str) -> Result<(), StaffError> {
        if !self.store.delete_appointment(appointment_id).await? {
            return Err(StaffError::NotFound(format!("appointment {appointment_id}")));
        }
        tracing::info!(appointment_id, "slot freed");
        Ok(())
    }

    async fn transition(
        &self,
        appointment_id: &str,
        next: AppointmentStatus,
    ) -> Result<Appointment, StaffError> {
        let not_found = || StaffError::NotFound(format!("appointment {appointment_id}"));
        let current = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or_else(not_found)?;
        if !current.status.can_transition_to(next) {
            return Err(StaffError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }
        let updated = self
            .store
            .update_appointment_status(appointment_id, next)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(appointment_id, status = ?next, "appointment status changed");
        Ok(updated)
    }
}
