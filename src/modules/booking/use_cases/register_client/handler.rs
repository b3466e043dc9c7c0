// Client self-registration.
//
// Validates the form, refuses duplicates by email or phone, signs the client up with the
// identity provider and creates an unblocked profile keyed by the provider identity.

use crate::modules::booking::core::contact::normalize_phone;
use crate::modules::booking::core::model::Client;
use crate::modules::booking::use_cases::register_client::command::RegisterClient;
use crate::shared::infrastructure::data_store::{ClientStore, StoreError};
use crate::shared::infrastructure::identity::{IdentityError, IdentityMetadata, IdentityProvider};
use chrono::{Months, NaiveDate};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

pub const MINIMUM_AGE_YEARS: u32 = 18;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("client is under the minimum age")]
    Underage,

    #[error("a client with this email or phone already exists")]
    Duplicate,

    #[error(transparent)]
    Identity(IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistrationError {
    pub fn user_message(&self) -> String {
        match self {
            RegistrationError::Validation(message) => message.clone(),
            RegistrationError::Underage => {
                format!("Debes tener al menos {MINIMUM_AGE_YEARS} años para registrarte.")
            }
            RegistrationError::Duplicate => {
                "Ya existe una cuenta con este correo o teléfono.".to_string()
            }
            RegistrationError::Identity(_) | RegistrationError::Store(_) => {
                "No pudimos completar el registro. Por favor, inténtalo de nuevo.".to_string()
            }
        }
    }
}

impl From<IdentityError> for RegistrationError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::AlreadyRegistered(_) => RegistrationError::Duplicate,
            other => RegistrationError::Identity(other),
        }
    }
}

pub(crate) fn first_validation_message(
    errors: &validator::ValidationErrors,
    fallback: &str,
) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| fallback.to_string())
}

pub struct RegisterClientHandler<TStore, TIdentity>
where
    TStore: ClientStore + 'static,
    TIdentity: IdentityProvider + 'static,
{
    store: Arc<TStore>,
    identity: Arc<TIdentity>,
}

impl<TStore, TIdentity> RegisterClientHandler<TStore, TIdentity>
where
    TStore: ClientStore + 'static,
    TIdentity: IdentityProvider + 'static,
{
    pub fn new(store: Arc<TStore>, identity: Arc<TIdentity>) -> Self {
        Self { store, identity }
    }

    pub async fn handle(
        &self,
        command: RegisterClient,
        today: NaiveDate,
    ) -> Result<Client, RegistrationError> {
        command
            .validate()
            .map_err(|errors| {
                RegistrationError::Validation(first_validation_message(
                    &errors,
                    "Datos de registro inválidos",
                ))
            })?;
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(RegistrationError::Validation("El nombre es obligatorio".into()));
        }
        let phone = normalize_phone(&command.phone)
            .ok_or_else(|| RegistrationError::Validation("El teléfono no es válido".into()))?;
        let birth_date = command.birth_date.ok_or_else(|| {
            RegistrationError::Validation("La fecha de nacimiento es obligatoria".into())
        })?;
        let latest_allowed = today
            .checked_sub_months(Months::new(MINIMUM_AGE_YEARS * 12))
            .ok_or(RegistrationError::Underage)?;
        if birth_date > latest_allowed {
            return Err(RegistrationError::Underage);
        }

        if self
            .store
            .find_by_email_or_phone(&command.email, &phone)
            .await?
            .is_some()
        {
            tracing::warn!(email = %command.email, "registration refused: duplicate");
            return Err(RegistrationError::Duplicate);
        }

        let session = self
            .identity
            .sign_up(
                &command.email,
                &command.password,
                IdentityMetadata {
                    full_name: name.clone(),
                    phone: phone.clone(),
                },
            )
            .await?;

        let client = Client {
            id: session.user_id,
            name,
            phone,
            email: command.email,
            birth_date: Some(birth_date),
            branch: command.branch,
            blocked: false,
            visit_count: 0,
        };
        self.store.upsert_client(client.clone()).await?;
        tracing::info!(client_id = %client.id, "client registered");
        Ok(client)
    }
}
