use crate::modules::booking::core::model::Barber;
use crate::shared::core::branch::Branch;
use chrono::Weekday;
use std::fs;

#[derive(Clone)]
pub struct BarberBuilder {
    inner: Barber,
}

impl Default for BarberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl BarberBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/barber.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn branch(mut self, v: Branch) -> Self {
        self.inner.branch = v;
        self
    }

    pub fn phone(mut self, v: impl Into<String>) -> Self {
        self.inner.phone = v.into();
        self
    }

    pub fn offers_free_birthday_cut(mut self, v: bool) -> Self {
        self.inner.offers_free_birthday_cut = v;
        self
    }

    pub fn blocked_weekdays(mut self, v: Vec<Weekday>) -> Self {
        self.inner.blocked_weekdays = v;
        self
    }

    pub fn long_service_eligible(mut self, v: bool) -> Self {
        self.inner.long_service_eligible = v;
        self
    }

    pub fn build(self) -> Barber {
        self.inner
    }
}

#[cfg(test)]
mod barber_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = BarberBuilder::default().build();
        assert_eq!(built.id, "barber-0001");
        assert_eq!(built.name, "Carlos");
        assert_eq!(built.branch, Branch::Brasil);
        assert!(built.blocked_weekdays.is_empty());
    }
}
