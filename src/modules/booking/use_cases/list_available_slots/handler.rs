use crate::modules::booking::core::availability::{
    Availability, AvailabilityRequest, BookedSlot, EmptyReason, resolve_availability,
};
use crate::modules::booking::core::calendar::legal_booking_date;
use crate::modules::booking::core::policy::SlotPolicy;
use crate::shared::infrastructure::data_store::{AppointmentFilter, DataStore};
use chrono::NaiveDate;
use std::sync::Arc;

pub struct ListAvailableSlotsHandler<TStore>
where
    TStore: DataStore + 'static,
{
    store: Arc<TStore>,
    policy: SlotPolicy,
}

impl<TStore> ListAvailableSlotsHandler<TStore>
where
    TStore: DataStore + 'static,
{
    pub fn new(store: Arc<TStore>, policy: SlotPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn handle(&self, request: &AvailabilityRequest, today: NaiveDate) -> Availability {
        let barber = match self.store.get_barber(&request.barber_id).await {
            Ok(Some(barber)) if barber.can_perform(request.service) => barber,
            Ok(_) => return Availability::Empty(EmptyReason::BarberNotEligible),
            Err(e) => {
                tracing::error!(error = %e, barber_id = %request.barber_id, "could not load barber");
                return Availability::Unavailable;
            }
        };

        if request.date != legal_booking_date(today, Some(&barber)) {
            return Availability::Empty(EmptyReason::DateNotOffered);
        }

        let filter = AppointmentFilter::default()
            .barber(&barber.id)
            .on(request.date)
            .holding_slot();
        let booked: Vec<BookedSlot> = match self.store.list_appointments(&filter).await {
            Ok(appointments) => appointments
                .into_iter()
                .map(|a| BookedSlot {
                    time: a.time,
                    service: a.service,
                })
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, barber_id = %barber.id, "could not load bookings");
                return Availability::Unavailable;
            }
        };

        resolve_availability(request, &booked, &self.policy)
    }
}
