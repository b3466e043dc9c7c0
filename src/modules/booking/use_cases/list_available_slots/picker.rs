// Slot list state behind the booking form.
//
// Every recomputation takes a ticket from the RequestGuard. A result only replaces the
// displayed list while its ticket is the latest one, so a slow answer for a previous
// barber or service never overwrites the current one. The selected time is dropped as
// soon as the list it came from stops offering it.

use crate::modules::booking::core::availability::{Availability, AvailabilityRequest};
use crate::modules::booking::use_cases::list_available_slots::handler::ListAvailableSlotsHandler;
use crate::shared::core::request_guard::{RequestGuard, Ticket};
use crate::shared::infrastructure::data_store::DataStore;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PickerState {
    availability: Availability,
    selected: Option<NaiveTime>,
}

pub struct SlotPicker<TStore>
where
    TStore: DataStore + 'static,
{
    handler: ListAvailableSlotsHandler<TStore>,
    guard: RequestGuard,
    state: RwLock<PickerState>,
}

impl<TStore> SlotPicker<TStore>
where
    TStore: DataStore + 'static,
{
    pub fn new(handler: ListAvailableSlotsHandler<TStore>) -> Self {
        Self {
            handler,
            guard: RequestGuard::new(),
            state: RwLock::new(PickerState::default()),
        }
    }

    pub fn begin(&self) -> Ticket {
        self.guard.issue()
    }

    /// Applies a result if `ticket` is still current. Returns whether it was applied.
    pub async fn complete(&self, ticket: Ticket, availability: Availability) -> bool {
        let mut state = self.state.write().await;
        if !self.guard.is_current(ticket) {
            tracing::debug!("discarding stale availability");
            return false;
        }
        if state.selected.is_some_and(|t| !availability.offers(t)) {
            state.selected = None;
        }
        state.availability = availability;
        true
    }

    /// Recomputes the list for a new selection of barber, service or date.
    pub async fn refresh(&self, request: &AvailabilityRequest, today: NaiveDate) -> bool {
        let ticket = self.begin();
        let availability = self.handler.handle(request, today).await;
        self.complete(ticket, availability).await
    }

    pub async fn clear(&self) {
        self.guard.invalidate();
        *self.state.write().await = PickerState::default();
    }

    pub async fn current(&self) -> Availability {
        self.state.read().await.availability.clone()
    }

    pub async fn select(&self, time: NaiveTime) -> bool {
        let mut state = self.state.write().await;
        if !state.availability.offers(time) {
            return false;
        }
        state.selected = Some(time);
        true
    }

    pub async fn selected(&self) -> Option<NaiveTime> {
        self.state.read().await.selected
    }
}
