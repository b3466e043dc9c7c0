use crate::modules::booking::core::conflict_guard::Conflict;
use crate::modules::booking::core::model::AppointmentStatus;
use crate::shared::infrastructure::data_store::StoreError;
use thiserror::Error;

/// Failure of a staff operation from the management views.
#[derive(Debug, Error)]
pub enum StaffError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("cannot move an appointment from {from:?} to {to:?}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("booking conflict: {0:?}")]
    Conflict(Conflict),

    #[error("not eligible: {0}")]
    NotEligible(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StaffError {
    pub fn user_message(&self) -> String {
        match self {
            StaffError::NotFound(_) => "El registro ya no existe.".to_string(),
            StaffError::InvalidTransition { .. } => {
                "La cita no admite ese cambio de estado.".to_string()
            }
            StaffError::Conflict(conflict) => conflict.user_message(),
            StaffError::NotEligible(reason) | StaffError::Validation(reason) => reason.clone(),
            StaffError::Store(_) => {
                "No pudimos guardar los cambios. Por favor, inténtalo de nuevo.".to_string()
            }
        }
    }
}
