use crate::modules::booking::core::policy::SlotPolicy;
use crate::modules::booking::core::service::DurationClass;
use chrono::{NaiveTime, TimeDelta};

/// Candidate start times for a duration class, before anything booked is removed.
pub fn generate_slots(duration_class: DurationClass, policy: &SlotPolicy) -> Vec<NaiveTime> {
    match duration_class {
        DurationClass::Ordinary => generate_slots_from(policy.opening, policy),
        DurationClass::LongDuration => {
            let mut starts = policy.long_service_starts.clone();
            starts.sort();
            starts.dedup();
            starts
        }
    }
}

/// Ordinary slots on the cadence grid anchored at opening, starting no earlier than `start`.
pub fn generate_slots_from(start: NaiveTime, policy: &SlotPolicy) -> Vec<NaiveTime> {
    let cadence = TimeDelta::minutes(i64::from(policy.cadence_minutes.max(1)));
    let mut slots = Vec::new();
    let mut slot = policy.opening;
    while slot <= policy.closing {
        if slot >= start {
            slots.push(slot);
        }
        let (next, wrapped) = slot.overflowing_add_signed(cadence);
        if wrapped != 0 {
            break;
        }
        slot = next;
    }
    slots
}
