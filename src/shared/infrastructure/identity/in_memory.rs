// In memory identity provider holding a single browser-like current session.

use crate::shared::infrastructure::identity::{
    AuthEvent, IdentityError, IdentityMetadata, IdentityProvider, Session,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

struct Account {
    password: String,
    session: Session,
}

pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
    is_offline: bool,
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            events,
            is_offline: false,
        }
    }
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), IdentityError> {
        if self.is_offline {
            return Err(IdentityError::Backend("Identity provider offline".into()));
        }
        Ok(())
    }

    fn emit(&self, event: AuthEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: IdentityMetadata,
    ) -> Result<Session, IdentityError> {
        self.ensure_online()?;
        let key = email.to_lowercase();
        let session = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                return Err(IdentityError::AlreadyRegistered(email.to_string()));
            }
            let session = Session {
                user_id: Uuid::now_v7().to_string(),
                email: email.to_string(),
                metadata,
            };
            accounts.insert(
                key,
                Account {
                    password: password.to_string(),
                    session: session.clone(),
                },
            );
            session
        };
        *self.current.write().await = Some(session.clone());
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, IdentityError> {
        self.ensure_online()?;
        let session = {
            let accounts = self.accounts.read().await;
            match accounts.get(&email.to_lowercase()) {
                Some(account) if account.password == password => account.session.clone(),
                _ => return Err(IdentityError::InvalidCredentials),
            }
        };
        *self.current.write().await = Some(session.clone());
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn get_session(&self) -> Result<Option<Session>, IdentityError> {
        self.ensure_online()?;
        Ok(self.current.read().await.clone())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.ensure_online()?;
        *self.current.write().await = None;
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod in_memory_identity_provider_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn metadata() -> IdentityMetadata {
        IdentityMetadata {
            full_name: "Camila Soto".into(),
            phone: "987654321".into(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_sign_up_and_open_a_session(metadata: IdentityMetadata) {
        let provider = InMemoryIdentityProvider::new();
        let mut events = provider.subscribe();
        let session = provider
            .sign_up("camila@example.com", "secreto123", metadata)
            .await
            .expect("sign up failed");
        assert_eq!(provider.get_session().await.unwrap(), Some(session.clone()));
        assert_eq!(events.try_recv().unwrap(), AuthEvent::SignedIn(session));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_duplicate_email(metadata: IdentityMetadata) {
        let provider = InMemoryIdentityProvider::new();
        provider
            .sign_up("camila@example.com", "secreto123", metadata.clone())
            .await
            .unwrap();
        let result = provider
            .sign_up("CAMILA@example.com", "otro", metadata)
            .await;
        assert_eq!(
            result,
            Err(IdentityError::AlreadyRegistered("CAMILA@example.com".into()))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_sign_in_out_and_reject_bad_passwords(metadata: IdentityMetadata) {
        let provider = InMemoryIdentityProvider::new();
        provider
            .sign_up("camila@example.com", "secreto123", metadata)
            .await
            .unwrap();
        provider.sign_out().await.unwrap();
        assert_eq!(provider.get_session().await.unwrap(), None);
        assert_eq!(
            provider
                .sign_in_with_password("camila@example.com", "equivocada")
                .await,
            Err(IdentityError::InvalidCredentials)
        );
        let session = provider
            .sign_in_with_password("camila@example.com", "secreto123")
            .await
            .unwrap();
        assert_eq!(session.email, "camila@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_offline() {
        let mut provider = InMemoryIdentityProvider::new();
        provider.toggle_offline();
        assert!(matches!(
            provider.get_session().await,
            Err(IdentityError::Backend(_))
        ));
    }
}
