// Scheduling constants. Every opening, closing, cadence and limit the engine uses is read
// from here so deployments can change them without touching the rules.

use crate::modules::booking::core::model::AppointmentStatus;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotPolicy {
    pub opening: NaiveTime,
    /// Last bookable start, inclusive.
    pub closing: NaiveTime,
    pub cadence_minutes: u32,
    pub long_service_starts: Vec<NaiveTime>,
    /// Earliest ordinary start for a barber already holding a long-duration service that day.
    pub afternoon_cutoff: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingPolicy {
    pub slots: SlotPolicy,
    pub max_active_appointments_per_client: u32,
    pub initial_status: AppointmentStatus,
    pub birthday_visit_threshold: u32,
    pub notification_country_code: String,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            opening: hm(9, 30),
            closing: hm(18, 30),
            cadence_minutes: 60,
            long_service_starts: vec![hm(8, 30), hm(9, 30), hm(10, 30)],
            afternoon_cutoff: hm(14, 30),
        }
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            slots: SlotPolicy::default(),
            max_active_appointments_per_client: 1,
            initial_status: AppointmentStatus::Pending,
            birthday_visit_threshold: 4,
            notification_country_code: "56".to_string(),
        }
    }
}
