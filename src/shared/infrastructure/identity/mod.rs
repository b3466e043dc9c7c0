// Port onto the external identity provider.
//
// The provider owns credentials and sessions. The booking engine only needs to know
// whether a session exists and which identity it carries; that identity is the client key
// used in every client and appointment record.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMetadata {
    pub full_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub metadata: IdentityMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("user already registered: {0}")]
    AlreadyRegistered(String),

    #[error("identity backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: IdentityMetadata,
    ) -> Result<Session, IdentityError>;
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, IdentityError>;
    /// `Ok(None)` means nobody is signed in.
    async fn get_session(&self) -> Result<Option<Session>, IdentityError>;
    async fn sign_out(&self) -> Result<(), IdentityError>;
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

pub mod in_memory;
