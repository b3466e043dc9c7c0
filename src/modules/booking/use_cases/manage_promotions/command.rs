use crate::shared::core::branch::Branch;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreatePromotion {
    #[validate(length(min = 1, message = "El título es obligatorio"))]
    pub title: String,
    #[validate(length(min = 1, message = "La descripción es obligatoria"))]
    pub description: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub branch: Branch,
    #[validate(url(message = "La URL de la imagen no es válida"))]
    pub image_url: Option<String>,
}
