use crate::modules::booking::core::model::{Appointment, Client};
use crate::modules::booking::core::notification::BarberNotification;
use crate::modules::booking::core::service::Service;
use crate::shared::core::branch::Branch;
use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("malformed phone number")]
    MalformedPhone,

    #[error("unknown barber: {0}")]
    UnknownBarber(String),

    #[error("barber does not work at {0}")]
    BranchMismatch(Branch),

    #[error("barber does not perform {0:?}")]
    ServiceNotOffered(Service),

    #[error("only {legal} can be booked, got {submitted}")]
    DateNotOffered {
        submitted: NaiveDate,
        legal: NaiveDate,
    },

    #[error("{0} is not a start time for this service")]
    SlotNotOffered(NaiveTime),

    #[error("client is blocked")]
    ClientBlocked,

    #[error("client is not eligible for the birthday cut today")]
    NotBirthdayEligible,
}

impl DecideError {
    pub fn user_message(&self) -> String {
        match self {
            DecideError::MissingField(field) => format!("Falta completar el campo: {field}."),
            DecideError::MalformedPhone => "El teléfono ingresado no es válido.".to_string(),
            DecideError::UnknownBarber(_) => "El barbero seleccionado no existe.".to_string(),
            DecideError::BranchMismatch(branch) => {
                format!("El barbero seleccionado no atiende en la sede {branch}.")
            }
            DecideError::ServiceNotOffered(service) => format!(
                "El barbero seleccionado no realiza el servicio \"{}\".",
                service.label()
            ),
            DecideError::DateNotOffered { legal, .. } => format!(
                "Solo puedes agendar para el día: {}",
                crate::modules::booking::core::notification::format_date_es(*legal)
            ),
            DecideError::SlotNotOffered(time) => {
                format!("La hora {} no está disponible para este servicio.", time.format("%H:%M"))
            }
            DecideError::ClientBlocked => {
                "Tu cuenta ha sido bloqueada. No puedes agendar citas en este momento.".to_string()
            }
            DecideError::NotBirthdayEligible => {
                "El corte de cumpleaños gratis solo está disponible el día de tu cumpleaños y desde tu cuarta visita."
                    .to_string()
            }
        }
    }
}

pub enum Decision {
    Accepted {
        client: Client,
        appointment: Appointment,
        notification: BarberNotification,
    },
    Rejected {
        reason: DecideError,
    },
}
