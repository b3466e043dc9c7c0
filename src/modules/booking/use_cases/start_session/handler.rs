use crate::modules::booking::core::model::Client;
use crate::modules::booking::core::policy::BookingPolicy;
use crate::modules::booking::use_cases::start_session::session::BookingSession;
use crate::shared::infrastructure::data_store::{ClientStore, StoreError};
use crate::shared::infrastructure::identity::{IdentityError, IdentityProvider, Session};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Identity(IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<IdentityError> for SessionError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::InvalidCredentials => SessionError::InvalidCredentials,
            other => SessionError::Identity(other),
        }
    }
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::InvalidCredentials => "Credenciales incorrectas".to_string(),
            _ => "No pudimos cargar tu sesión. Por favor, inténtalo de nuevo.".to_string(),
        }
    }
}

pub struct SessionHandler<TStore, TIdentity>
where
    TStore: ClientStore + 'static,
    TIdentity: IdentityProvider + 'static,
{
    store: Arc<TStore>,
    identity: Arc<TIdentity>,
    policy: BookingPolicy,
}

impl<TStore, TIdentity> SessionHandler<TStore, TIdentity>
where
    TStore: ClientStore + 'static,
    TIdentity: IdentityProvider + 'static,
{
    pub fn new(store: Arc<TStore>, identity: Arc<TIdentity>, policy: BookingPolicy) -> Self {
        Self {
            store,
            identity,
            policy,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let session = self.identity.sign_in_with_password(email, password).await?;
        tracing::info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.identity.sign_out().await?;
        Ok(())
    }

    /// Opens the booking context for the signed-in user, or `None` when nobody is signed in.
    /// A user without a profile gets one built from the identity metadata.
    pub async fn start(&self, today: NaiveDate) -> Result<Option<BookingSession>, SessionError> {
        let Some(session) = self.identity.get_session().await? else {
            return Ok(None);
        };
        let client = match self.store.get_client(&session.user_id).await? {
            Some(client) => client,
            None => {
                let client = Client {
                    id: session.user_id.clone(),
                    name: session.metadata.full_name.clone(),
                    phone: session.metadata.phone.clone(),
                    email: session.email.clone(),
                    birth_date: None,
                    branch: None,
                    blocked: false,
                    visit_count: 0,
                };
                self.store.upsert_client(client.clone()).await?;
                tracing::info!(client_id = %client.id, "client profile created on first visit");
                client
            }
        };
        if client.blocked {
            tracing::warn!(client_id = %client.id, "blocked client opened the booking page");
        }
        let booking = BookingSession::new(session, client, self.policy.birthday_visit_threshold);
        tracing::debug!(
            client_id = %booking.client.id,
            birthday_cut = booking.birthday_on(booking.legal_date(today)).is_eligible(),
            "booking session opened"
        );
        Ok(Some(booking))
    }
}
