use crate::shared::core::branch::Branch;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RegisterClient {
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub name: String,
    #[validate(email(message = "El correo electrónico no es válido"))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub branch: Option<Branch>,
}
