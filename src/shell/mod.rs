// Composition root for the booking engine.
//
// Responsibilities
// - Read the booking policy from files and environment.
// - Instantiate concrete infrastructure implementations.
// - Wire implementations into use case handlers.

pub mod config;
pub mod telemetry;

use crate::modules::booking::core::policy::BookingPolicy;
use crate::modules::booking::use_cases::book_appointment::handler::BookAppointmentHandler;
use crate::modules::booking::use_cases::book_birthday_cut::handler::BookBirthdayCutHandler;
use crate::modules::booking::use_cases::check_birthdays::handler::CheckBirthdaysHandler;
use crate::modules::booking::use_cases::list_available_slots::handler::ListAvailableSlotsHandler;
use crate::modules::booking::use_cases::list_available_slots::picker::SlotPicker;
use crate::modules::booking::use_cases::list_barbers::handler::ListBarbersHandler;
use crate::modules::booking::use_cases::manage_appointments::handler::ManageAppointmentsHandler;
use crate::modules::booking::use_cases::manage_clients::handler::ManageClientsHandler;
use crate::modules::booking::use_cases::manage_promotions::handler::ManagePromotionsHandler;
use crate::modules::booking::use_cases::register_client::handler::RegisterClientHandler;
use crate::modules::booking::use_cases::staff_agenda::agenda::StaffAgenda;
use crate::modules::booking::use_cases::start_session::handler::SessionHandler;
use crate::shared::core::branch::Branch;
use crate::shared::infrastructure::change_feed::ChangeFeed;
use crate::shared::infrastructure::data_store::in_memory::InMemoryDataStore;
use crate::shared::infrastructure::identity::in_memory::InMemoryIdentityProvider;
use crate::shared::infrastructure::notification_outbox::in_memory::InMemoryNotificationOutbox;
use std::sync::Arc;

type Store = InMemoryDataStore;
type Identity = InMemoryIdentityProvider;
type Outbox = InMemoryNotificationOutbox;

pub struct BookingApp {
    pub policy: BookingPolicy,
    pub change_feed: ChangeFeed,
    pub store: Arc<Store>,
    pub identity: Arc<Identity>,
    pub outbox: Arc<Outbox>,
    pub register_client: RegisterClientHandler<Store, Identity>,
    pub session: SessionHandler<Store, Identity>,
    pub barbers: ListBarbersHandler<Store>,
    pub book_appointment: BookAppointmentHandler<Store, Identity, Outbox>,
    pub appointments: ManageAppointmentsHandler<Store>,
    pub clients: ManageClientsHandler<Store>,
    pub promotions: ManagePromotionsHandler<Store>,
    pub birthdays: CheckBirthdaysHandler<Store>,
    pub birthday_cuts: BookBirthdayCutHandler<Store>,
}

impl BookingApp {
    /// Everything in memory; used by local runs and end-to-end tests.
    pub fn in_memory(policy: BookingPolicy) -> Self {
        let change_feed = ChangeFeed::default();
        let store = Arc::new(InMemoryDataStore::new().with_change_feed(change_feed.clone()));
        Self::with_adapters(
            policy,
            change_feed,
            store,
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(InMemoryNotificationOutbox::new()),
        )
    }

    pub fn with_adapters(
        policy: BookingPolicy,
        change_feed: ChangeFeed,
        store: Arc<Store>,
        identity: Arc<Identity>,
        outbox: Arc<Outbox>,
    ) -> Self {
        Self {
            register_client: RegisterClientHandler::new(store.clone(), identity.clone()),
            session: SessionHandler::new(store.clone(), identity.clone(), policy.clone()),
            barbers: ListBarbersHandler::new(store.clone()),
            book_appointment: BookAppointmentHandler::new(
                store.clone(),
                identity.clone(),
                outbox.clone(),
                policy.clone(),
            ),
            appointments: ManageAppointmentsHandler::new(store.clone()),
            clients: ManageClientsHandler::new(store.clone()),
            promotions: ManagePromotionsHandler::new(store.clone()),
            birthdays: CheckBirthdaysHandler::new(store.clone(), policy.birthday_visit_threshold),
            birthday_cuts: BookBirthdayCutHandler::new(store.clone(), policy.clone()),
            policy,
            change_feed,
            store,
            identity,
            outbox,
        }
    }

    /// A fresh slot list for one booking form.
    pub fn slot_picker(&self) -> SlotPicker<Store> {
        SlotPicker::new(ListAvailableSlotsHandler::new(
            self.store.clone(),
            self.policy.slots.clone(),
        ))
    }

    pub fn staff_agenda(&self, branch: Branch) -> StaffAgenda<Store> {
        StaffAgenda::new(self.store.clone(), &self.change_feed, branch)
    }
}

/// Loads the policy and wires the in-memory application.
pub fn bootstrap() -> anyhow::Result<BookingApp> {
    let policy = config::load_policy()?;
    tracing::info!(
        opening = %policy.slots.opening,
        closing = %policy.slots.closing,
        afternoon_cutoff = %policy.slots.afternoon_cutoff,
        initial_status = ?policy.initial_status,
        "booking policy loaded"
    );
    Ok(BookingApp::in_memory(policy))
}
