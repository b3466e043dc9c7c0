use crate::modules::booking::core::service::Service;
use crate::shared::core::branch::Branch;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

/// What the client submitted on the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookAppointment {
    pub branch: Branch,
    pub barber_id: String,
    pub service: Service,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub client_name: String,
    pub client_phone: String,
    #[serde(default)]
    pub notes: String,
}
