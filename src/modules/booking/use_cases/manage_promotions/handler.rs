use crate::modules::booking::core::model::Promotion;
use crate::modules::booking::use_cases::manage_promotions::command::CreatePromotion;
use crate::modules::booking::use_cases::register_client::handler::first_validation_message;
use crate::modules::booking::use_cases::staff_error::StaffError;
use crate::shared::core::branch::Branch;
use crate::shared::infrastructure::data_store::{PromotionFilter, PromotionStore, StoreError};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct ManagePromotionsHandler<TStore>
where
    TStore: PromotionStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ManagePromotionsHandler<TStore>
where
    TStore: PromotionStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, command: CreatePromotion) -> Result<Promotion, StaffError> {
        // The admin form always sends the image field; empty means no image.
        let command = CreatePromotion {
            image_url: command
                .image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            ..command
        };
        command.validate().map_err(|errors| {
            StaffError::Validation(first_validation_message(&errors, "Datos de promoción inválidos"))
        })?;
        if command.title.trim().is_empty() || command.description.trim().is_empty() {
            return Err(StaffError::Validation(
                "El título y la descripción son obligatorios".into(),
            ));
        }
        if command.starts_on > command.ends_on {
            return Err(StaffError::Validation(
                "La fecha de término debe ser posterior a la de inicio".into(),
            ));
        }
        let promotion = Promotion {
            id: Uuid::now_v7().to_string(),
            title: command.title.trim().to_string(),
            description: command.description.trim().to_string(),
            starts_on: command.starts_on,
            ends_on: command.ends_on,
            branch: command.branch,
            image_url: command.image_url,
            active: true,
        };
        self.store.insert_promotion(promotion.clone()).await?;
        tracing::info!(promotion_id = %promotion.id, branch = %promotion.branch, "promotion created");
        Ok(promotion)
    }

    pub async fn delete(&self, promotion_id: &str) -> Result<(), StaffError> {
        if !self.store.delete_promotion(promotion_id).await? {
            return Err(StaffError::NotFound(format!("promotion {promotion_id}")));
        }
        Ok(())
    }

    /// Promotions shown on the public page: active, not yet expired, newest start first.
    pub async fn active(
        &self,
        branch: Option<Branch>,
        today: NaiveDate,
    ) -> Result<Vec<Promotion>, StoreError> {
        self.store
            .list_promotions(&PromotionFilter {
                branch,
                active_on: Some(today),
            })
            .await
    }
}
