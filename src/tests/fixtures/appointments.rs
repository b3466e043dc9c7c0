use crate::modules::booking::core::model::{Appointment, AppointmentStatus};
use crate::modules::booking::core::service::Service;
use crate::shared::core::branch::Branch;
use chrono::{NaiveDate, NaiveTime};
use std::fs;

#[derive(Clone)]
pub struct AppointmentBuilder {
    inner: Appointment,
}

impl Default for AppointmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl AppointmentBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/appointment.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn client_id(mut self, v: impl Into<String>) -> Self {
        self.inner.client_id = v.into();
        self
    }

    pub fn barber_id(mut self, v: impl Into<String>) -> Self {
        self.inner.barber_id = v.into();
        self
    }

    pub fn branch(mut self, v: Branch) -> Self {
        self.inner.branch = v;
        self
    }

    pub fn service(mut self, v: Service) -> Self {
        self.inner.service = v;
        self
    }

    pub fn date(mut self, v: NaiveDate) -> Self {
        self.inner.date = v;
        self
    }

    pub fn time(mut self, v: NaiveTime) -> Self {
        self.inner.time = v;
        self
    }

    pub fn status(mut self, v: AppointmentStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn build(self) -> Appointment {
        self.inner
    }
}

#[cfg(test)]
mod appointment_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = AppointmentBuilder::default().build();
        assert_eq!(built.id, "appt-0001");
        assert_eq!(built.service, Service::StandardCut);
        assert_eq!(built.status, AppointmentStatus::Pending);
        assert_eq!(built.time, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
    }
}
