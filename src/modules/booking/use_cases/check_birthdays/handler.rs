use crate::modules::booking::core::birthday::{BirthdayPromotion, evaluate_birthday};
use crate::modules::booking::core::model::Client;
use crate::shared::infrastructure::data_store::{ClientStore, StoreError};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayClient {
    pub client: Client,
    pub promotion: BirthdayPromotion,
}

pub struct CheckBirthdaysHandler<TStore>
where
    TStore: ClientStore + 'static,
{
    store: Arc<TStore>,
    visit_threshold: u32,
}

impl<TStore> CheckBirthdaysHandler<TStore>
where
    TStore: ClientStore + 'static,
{
    pub fn new(store: Arc<TStore>, visit_threshold: u32) -> Self {
        Self {
            store,
            visit_threshold,
        }
    }

    pub async fn handle(&self, today: NaiveDate) -> Result<Vec<BirthdayClient>, StoreError> {
        let clients = self.store.list_clients().await?;
        Ok(clients
            .into_iter()
            .filter_map(|client| {
                let promotion = evaluate_birthday(
                    client.birth_date,
                    client.visit_count,
                    today,
                    self.visit_threshold,
                );
                promotion
                    .is_birthday_today
                    .then_some(BirthdayClient { client, promotion })
            })
            .collect())
    }
}
