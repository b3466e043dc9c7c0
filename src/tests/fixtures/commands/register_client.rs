use crate::modules::booking::use_cases::register_client::command::RegisterClient;
use chrono::NaiveDate;
use std::fs;

#[derive(Clone)]
pub struct RegisterClientBuilder {
    inner: RegisterClient,
}

impl Default for RegisterClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl RegisterClientBuilder {
    pub fn new() -> Self {
        let json_str =
            fs::read_to_string("./src/tests/fixtures/json/register_client.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn email(mut self, v: impl Into<String>) -> Self {
        self.inner.email = v.into();
        self
    }

    pub fn password(mut self, v: impl Into<String>) -> Self {
        self.inner.password = v.into();
        self
    }

    pub fn phone(mut self, v: impl Into<String>) -> Self {
        self.inner.phone = v.into();
        self
    }

    pub fn birth_date(mut self, v: Option<NaiveDate>) -> Self {
        self.inner.birth_date = v;
        self
    }

    pub fn build(self) -> RegisterClient {
        self.inner
    }
}
