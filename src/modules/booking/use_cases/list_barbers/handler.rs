use crate::modules::booking::core::model::Barber;
use crate::modules::booking::core::service::Service;
use crate::shared::core::branch::Branch;
use crate::shared::infrastructure::data_store::{BarberDirectory, BarberFilter, StoreError};
use std::sync::Arc;

pub struct ListBarbersHandler<TStore>
where
    TStore: BarberDirectory + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ListBarbersHandler<TStore>
where
    TStore: BarberDirectory + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    /// Barbers of one branch, narrowed to those able to perform `service` when one is chosen.
    pub async fn handle(
        &self,
        branch: Branch,
        service: Option<Service>,
    ) -> Result<Vec<Barber>, StoreError> {
        let filter = BarberFilter {
            branch: Some(branch),
            offers_free_cut: service.filter(Service::is_birthday_cut).map(|_| true),
        };
        let mut barbers = self.store.list_barbers(&filter).await.inspect_err(|e| {
            tracing::error!(error = %e, branch = %branch, "could not list barbers");
        })?;
        if let Some(service) = service {
            barbers.retain(|b| b.can_perform(service));
        }
        Ok(barbers)
    }
}
