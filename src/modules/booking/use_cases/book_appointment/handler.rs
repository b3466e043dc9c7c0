use crate::modules::booking::core::availability::{
    AvailabilityRequest, BookedSlot, resolve_availability,
};
use crate::modules::booking::core::conflict_guard::{Conflict, ConflictGuard, GuardOutcome};
use crate::modules::booking::core::model::{Appointment, Client};
use crate::modules::booking::core::notification::BarberNotification;
use crate::modules::booking::core::policy::BookingPolicy;
use crate::modules::booking::use_cases::book_appointment::command::BookAppointment;
use crate::modules::booking::use_cases::book_appointment::decide::{
    BookingContext, check_client_status, decide_booking, validate_fields, validate_request,
};
use crate::modules::booking::use_cases::book_appointment::decision::{DecideError, Decision};
use crate::modules::booking::use_cases::book_appointment::stage::BookingStage;
use crate::shared::core::request_guard::BusyFlag;
use crate::shared::infrastructure::data_store::{AppointmentFilter, DataStore, StoreError};
use crate::shared::infrastructure::identity::{IdentityError, IdentityProvider, Session};
use crate::shared::infrastructure::notification_outbox::{NotificationOutbox, NotificationRow};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("validation failed: {0}")]
    Validation(DecideError),

    #[error("authentication required")]
    AuthRequired,

    #[error("client is blocked")]
    BlockedClient,

    #[error("booking conflict: {0:?}")]
    Conflict(Conflict),

    #[error(transparent)]
    TransientStore(#[from] StoreError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("a booking is already being submitted")]
    Busy,
}

impl BookingError {
    /// Short Spanish message naming the obstacle, safe to show to the client.
    pub fn user_message(&self) -> String {
        match self {
            BookingError::Validation(reason) => reason.user_message(),
            BookingError::AuthRequired => {
                "Debes iniciar sesión para agendar una cita.".to_string()
            }
            BookingError::BlockedClient => DecideError::ClientBlocked.user_message(),
            BookingError::Conflict(conflict) => conflict.user_message(),
            BookingError::TransientStore(_) | BookingError::Identity(_) => {
                "No pudimos completar tu reserva. Por favor, inténtalo de nuevo.".to_string()
            }
            BookingError::Busy => "Tu reserva ya se está procesando.".to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookingError::TransientStore(_) | BookingError::Identity(_)
        )
    }
}

impl From<DecideError> for BookingError {
    fn from(reason: DecideError) -> Self {
        match reason {
            DecideError::ClientBlocked => BookingError::BlockedClient,
            other => BookingError::Validation(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    pub appointment: Appointment,
    pub notification: BarberNotification,
    pub deep_link: String,
}

pub struct BookAppointmentHandler<TStore, TIdentity, TOutbox>
where
    TStore: DataStore + 'static,
    TIdentity: IdentityProvider + 'static,
    TOutbox: NotificationOutbox + 'static,
{
    store: Arc<TStore>,
    identity: Arc<TIdentity>,
    outbox: Arc<TOutbox>,
    guard: ConflictGuard<TStore>,
    policy: BookingPolicy,
    busy: BusyFlag,
    stage: watch::Sender<BookingStage>,
}

impl<TStore, TIdentity, TOutbox> BookAppointmentHandler<TStore, TIdentity, TOutbox>
where
    TStore: DataStore + 'static,
    TIdentity: IdentityProvider + 'static,
    TOutbox: NotificationOutbox + 'static,
{
    pub fn new(
        store: Arc<TStore>,
        identity: Arc<TIdentity>,
        outbox: Arc<TOutbox>,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            guard: ConflictGuard::new(store.clone(), policy.max_active_appointments_per_client),
            store,
            identity,
            outbox,
            policy,
            busy: BusyFlag::new(),
            stage: watch::Sender::new(BookingStage::Idle),
        }
    }

    /// Busy while a submission is in flight; the form's submit control mirrors this.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn watch_stage(&self) -> watch::Receiver<BookingStage> {
        self.stage.subscribe()
    }

    pub async fn handle(
        &self,
        command: BookAppointment,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<BookingOutcome, BookingError> {
        let _busy = self.busy.try_acquire().ok_or(BookingError::Busy)?;
        let result = self.run(command, today, now).await;
        match &result {
            Ok(outcome) => {
                tracing::info!(
                    appointment_id = %outcome.appointment.id,
                    client_id = %outcome.appointment.client_id,
                    barber_id = %outcome.appointment.barber_id,
                    date = %outcome.appointment.date,
                    time = %outcome.appointment.time,
                    "appointment booked"
                );
                self.advance(BookingStage::Succeeded {
                    appointment_id: outcome.appointment.id.clone(),
                });
            }
            Err(error) => {
                if error.is_retryable() {
                    tracing::error!(%error, "booking failed");
                } else {
                    tracing::warn!(%error, "booking rejected");
                }
                self.advance(BookingStage::Failed {
                    reason: error.user_message(),
                });
            }
        }
        result
    }

    fn advance(&self, stage: BookingStage) {
        tracing::debug!(?stage, "booking stage");
        self.stage.send_replace(stage);
    }

    async fn run(
        &self,
        command: BookAppointment,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<BookingOutcome, BookingError> {
        self.advance(BookingStage::ValidatingDate);
        validate_fields(&command)?;
        let barber = self
            .store
            .get_barber(&command.barber_id)
            .await?
            .ok_or_else(|| DecideError::UnknownBarber(command.barber_id.clone()))?;
        validate_request(&command, &barber, today, &self.policy)?;

        self.advance(BookingStage::CheckingClientStatus);
        let session = self
            .identity
            .get_session()
            .await?
            .ok_or(BookingError::AuthRequired)?;
        let client = self.load_client(&session).await?;
        check_client_status(&client, command.service, command.date, &self.policy)?;

        self.advance(BookingStage::CheckingConflicts);
        let outcome = self
            .guard
            .check(&client.id, &barber.id, command.date, command.time, today)
            .await?;
        if let GuardOutcome::Conflict(conflict) = outcome {
            return Err(BookingError::Conflict(conflict));
        }
        self.ensure_still_offered(&command).await?;

        let context = BookingContext {
            appointment_id: Uuid::now_v7().to_string(),
            today,
            now,
        };
        match decide_booking(command, &client, &barber, &context, &self.policy) {
            Decision::Accepted {
                client,
                appointment,
                notification,
            } => {
                self.advance(BookingStage::PersistingProfile);
                self.store.upsert_client(client).await?;

                self.advance(BookingStage::PersistingAppointment);
                self.store
                    .insert_appointment(appointment.clone())
                    .await
                    .map_err(|error| match error {
                        StoreError::UniqueViolation(_) => BookingError::Conflict(Conflict::SlotTaken {
                            barber_id: appointment.barber_id.clone(),
                            date: appointment.date,
                            time: appointment.time,
                        }),
                        other => BookingError::TransientStore(other),
                    })?;

                let deep_link = notification.deep_link(&self.policy.notification_country_code);
                self.hand_off(&notification, &deep_link).await;
                Ok(BookingOutcome {
                    appointment,
                    notification,
                    deep_link,
                })
            }
            Decision::Rejected { reason } => Err(reason.into()),
        }
    }

    /// Re-resolves the barber's day so a time hidden by the long-duration rules cannot be
    /// submitted directly.
    async fn ensure_still_offered(&self, command: &BookAppointment) -> Result<(), BookingError> {
        let booked: Vec<BookedSlot> = self
            .store
            .list_appointments(
                &AppointmentFilter::default()
                    .barber(&command.barber_id)
                    .on(command.date)
                    .holding_slot(),
            )
            .await?
            .into_iter()
            .map(|a| BookedSlot {
                time: a.time,
                service: a.service,
            })
            .collect();
        let request = AvailabilityRequest {
            barber_id: command.barber_id.clone(),
            date: command.date,
            service: command.service,
        };
        if !resolve_availability(&request, &booked, &self.policy.slots).offers(command.time) {
            return Err(BookingError::Validation(DecideError::SlotNotOffered(command.time)));
        }
        Ok(())
    }

    /// Reads the client profile fresh. A signed-in user without a profile is a first visit
    /// and gets one built from the session; a failed read aborts the booking.
    async fn load_client(&self, session: &Session) -> Result<Client, BookingError> {
        let stored = self.store.get_client(&session.user_id).await?;
        Ok(stored.unwrap_or_else(|| Client {
            id: session.user_id.clone(),
            name: session.metadata.full_name.clone(),
            phone: session.metadata.phone.clone(),
            email: session.email.clone(),
            birth_date: None,
            branch: None,
            blocked: false,
            visit_count: 0,
        }))
    }

    async fn hand_off(&self, notification: &BarberNotification, deep_link: &str) {
        let row = NotificationRow {
            appointment_id: notification.appointment_id.clone(),
            deep_link: deep_link.to_string(),
            payload: notification.clone(),
        };
        if let Err(error) = self.outbox.enqueue(row).await {
            tracing::error!(
                %error,
                appointment_id = %notification.appointment_id,
                "barber notification not delivered"
            );
        }
    }
}
