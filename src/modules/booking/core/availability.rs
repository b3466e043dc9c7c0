// Availability resolution.
//
// Combines the slot profile of a service with the barber's existing bookings for one date:
// - booked start times are never offered again,
// - a barber holding a long-duration service that day only offers ordinary slots from the
//   afternoon cutoff onwards,
// - a long-duration start is only offered while the barber's morning up to the cutoff is free.
//
// A failed fetch is `Unavailable`, never an empty list.

use crate::modules::booking::core::policy::SlotPolicy;
use crate::modules::booking::core::service::{DurationClass, Service};
use crate::modules::booking::core::slots::{generate_slots, generate_slots_from};
use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRequest {
    pub barber_id: String,
    pub date: NaiveDate,
    pub service: Service,
}

/// A slot-holding appointment of the requested barber on the requested date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedSlot {
    pub time: NaiveTime,
    pub service: Service,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    FullyBooked,
    LongServiceAlreadyBooked,
    MorningAlreadyBooked,
    BarberNotEligible,
    DateNotOffered,
}

impl EmptyReason {
    pub fn user_message(&self) -> &'static str {
        match self {
            EmptyReason::FullyBooked => "No quedan horas disponibles para este barbero en esta fecha.",
            EmptyReason::LongServiceAlreadyBooked => {
                "Este barbero ya tiene un servicio de Permanente agendado para esta fecha."
            }
            EmptyReason::MorningAlreadyBooked => {
                "Este barbero ya tiene citas en la mañana; no es posible agendar un Permanente."
            }
            EmptyReason::BarberNotEligible => "Este barbero no realiza el servicio seleccionado.",
            EmptyReason::DateNotOffered => "La fecha seleccionada no está disponible para agendar.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    NotComputed,
    Available(Vec<NaiveTime>),
    Empty(EmptyReason),
    /// The bookings could not be read; the caller should offer a retry.
    Unavailable,
}

impl Availability {
    pub fn slots(&self) -> &[NaiveTime] {
        match self {
            Availability::Available(slots) => slots,
            _ => &[],
        }
    }

    pub fn offers(&self, time: NaiveTime) -> bool {
        self.slots().contains(&time)
    }
}

pub fn resolve_availability(
    request: &AvailabilityRequest,
    booked: &[BookedSlot],
    policy: &SlotPolicy,
) -> Availability {
    let holds_long_service = booked
        .iter()
        .any(|b| b.service.duration_class() == DurationClass::LongDuration);

    let candidates = match request.service.duration_class() {
        DurationClass::LongDuration if holds_long_service => {
            return Availability::Empty(EmptyReason::LongServiceAlreadyBooked);
        }
        DurationClass::LongDuration => {
            let starts = generate_slots(DurationClass::LongDuration, policy);
            let free: Vec<NaiveTime> = starts
                .iter()
                .copied()
                .filter(|start| {
                    !booked
                        .iter()
                        .any(|b| b.time >= *start && b.time < policy.afternoon_cutoff)
                })
                .collect();
            if free.is_empty() && !starts.is_empty() && !booked.is_empty() {
                return Availability::Empty(EmptyReason::MorningAlreadyBooked);
            }
            free
        }
        DurationClass::Ordinary if holds_long_service => {
            generate_slots_from(policy.afternoon_cutoff, policy)
        }
        DurationClass::Ordinary => generate_slots(DurationClass::Ordinary, policy),
    };

    let free: Vec<NaiveTime> = candidates
        .into_iter()
        .filter(|slot| !booked.iter().any(|b| b.time == *slot))
        .collect();

    tracing::debug!(
        barber_id = %request.barber_id,
        date = %request.date,
        offered = free.len(),
        "resolved availability"
    );

    if free.is_empty() {
        Availability::Empty(EmptyReason::FullyBooked)
    } else {
        Availability::Available(free)
    }
}
