use crate::modules::booking::core::service::Service;
use crate::modules::booking::use_cases::book_appointment::command::BookAppointment;
use crate::shared::core::branch::Branch;
use chrono::{NaiveDate, NaiveTime};
use std::fs;

#[derive(Clone)]
pub struct BookAppointmentBuilder {
    inner: BookAppointment,
}

impl Default for BookAppointmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl BookAppointmentBuilder {
    pub fn new() -> Self {
        let json_str =
            fs::read_to_string("./src/tests/fixtures/json/book_appointment.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn branch(mut self, v: Branch) -> Self {
        self.inner.branch = v;
        self
    }

    pub fn barber_id(mut self, v: impl Into<String>) -> Self {
        self.inner.barber_id = v.into();
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

    pub fn client_name(mut self, v: impl Into<String>) -> Self {
        self.inner.client_name = v.into();
        self
    }

    pub fn client_phone(mut self, v: impl Into<String>) -> Self {
        self.inner.client_phone = v.into();
        self
    }

    pub fn notes(mut self, v: impl Into<String>) -> Self {
        self.inner.notes = v.into();
        self
    }

    pub fn build(self) -> BookAppointment {
        self.inner
    }
}

#[cfg(test)]
mod book_appointment_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = BookAppointmentBuilder::default().build();
        assert_eq!(built.branch, Branch::Brasil);
        assert_eq!(built.barber_id, "barber-0001");
        assert_eq!(built.service, Service::StandardCut);
        assert_eq!(built.date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(built.notes, "Degradado bajo");
    }
}
