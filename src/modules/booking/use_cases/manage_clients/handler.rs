use crate::modules::booking::core::model::Client;
use crate::modules::booking::use_cases::staff_error::StaffError;
use crate::shared::infrastructure::data_store::{ClientStore, ClientUpdate};
use std::sync::Arc;

pub struct ManageClientsHandler<TStore>
where
    TStore: ClientStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ManageClientsHandler<TStore>
where
    TStore: ClientStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Client>, StaffError> {
        Ok(self.store.list_clients().await?)
    }

    /// A blocked client can still sign in but every booking attempt is refused.
    pub async fn set_blocked(&self, client_id: &str, blocked: bool) -> Result<Client, StaffError> {
        let update = ClientUpdate {
            blocked: Some(blocked),
            ..Default::default()
        };
        let client = self
            .store
            .update_client(client_id, update)
            .await?
            .ok_or_else(|| StaffError::NotFound(format!("client {client_id}")))?;
        tracing::info!(client_id, blocked, "client block flag changed");
        Ok(client)
    }
}
