use crate::modules::booking::core::model::Client;
use crate::shared::core::branch::Branch;
use chrono::NaiveDate;
use std::fs;

#[derive(Clone)]
pub struct ClientBuilder {
    inner: Client,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ClientBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/client.json").unwrap();
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

    pub fn phone(mut self, v: impl Into<String>) -> Self {
        self.inner.phone = v.into();
        self
    }

    pub fn email(mut self, v: impl Into<String>) -> Self {
        self.inner.email = v.into();
        self
    }

    pub fn birth_date(mut self, v: Option<NaiveDate>) -> Self {
        self.inner.birth_date = v;
        self
    }

    pub fn branch(mut self, v: Option<Branch>) -> Self {
        self.inner.branch = v;
        self
    }

    pub fn blocked(mut self, v: bool) -> Self {
        self.inner.blocked = v;
        self
    }

    pub fn visit_count(mut self, v: u32) -> Self {
        self.inner.visit_count = v;
        self
    }

    pub fn build(self) -> Client {
        self.inner
    }
}

#[cfg(test)]
mod client_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn setters_override_fields_and_build_returns_inner() {
        let built = ClientBuilder::new()
            .id("client-9")
            .name("Diego Rojas")
            .phone("955555555")
            .email("diego@example.com")
            .birth_date(None)
            .branch(Some(Branch::ManuelRodriguez))
            .blocked(true)
            .visit_count(7)
            .build();
        assert_eq!(built.id, "client-9");
        assert_eq!(built.name, "Diego Rojas");
        assert_eq!(built.birth_date, None);
        assert_eq!(built.branch, Some(Branch::ManuelRodriguez));
        assert!(built.blocked);
        assert_eq!(built.visit_count, 7);
    }
}
