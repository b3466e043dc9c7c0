// Pure decision functions for the booking transaction.
//
// Purpose
// - Validate a submitted booking against the calendar, the slot profile and the client,
//   and produce the records to persist on success.
//
// Responsibilities
// - The submitted date must be the single legal date for the barber.
// - The submitted time must be a start time of the service's slot profile.
// - Blocked clients never get a record; birthday cuts need an eligible client.
// - Never perform input or output.

use crate::modules::booking::core::birthday::evaluate_birthday;
use crate::modules::booking::core::calendar::legal_booking_date;
use crate::modules::booking::core::contact::normalize_phone;
use crate::modules::booking::core::model::{Appointment, Barber, Client};
use crate::modules::booking::core::notification::BarberNotification;
use crate::modules::booking::core::policy::BookingPolicy;
use crate::modules::booking::core::service::Service;
use crate::modules::booking::core::slots::generate_slots;
use crate::modules::booking::use_cases::book_appointment::command::BookAppointment;
use crate::modules::booking::use_cases::book_appointment::decision::{DecideError, Decision};
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingContext {
    pub appointment_id: String,
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
}

/// Checks that need nothing but the submitted form.
pub fn validate_fields(command: &BookAppointment) -> Result<(), DecideError> {
    if command.client_name.trim().is_empty() {
        return Err(DecideError::MissingField("nombre"));
    }
    if command.client_phone.trim().is_empty() {
        return Err(DecideError::MissingField("teléfono"));
    }
    normalize_phone(&command.client_phone).ok_or(DecideError::MalformedPhone)?;
    Ok(())
}

pub fn validate_request(
    command: &BookAppointment,
    barber: &Barber,
    today: NaiveDate,
    policy: &BookingPolicy,
) -> Result<(), DecideError> {
    validate_fields(command)?;
    if barber.branch != command.branch {
        return Err(DecideError::BranchMismatch(command.branch));
    }
    if !barber.can_perform(command.service) {
        return Err(DecideError::ServiceNotOffered(command.service));
    }
    let legal = legal_booking_date(today, Some(barber));
    if command.date != legal {
        return Err(DecideError::DateNotOffered {
            submitted: command.date,
            legal,
        });
    }
    if !generate_slots(command.service.duration_class(), &policy.slots).contains(&command.time) {
        return Err(DecideError::SlotNotOffered(command.time));
    }
    Ok(())
}

/// `on` is the appointment date; the birthday cut is granted for the day it is used.
pub fn check_client_status(
    client: &Client,
    service: Service,
    on: NaiveDate,
    policy: &BookingPolicy,
) -> Result<(), DecideError> {
    if client.blocked {
        return Err(DecideError::ClientBlocked);
    }
    if service.is_birthday_cut() {
        let promotion = evaluate_birthday(
            client.birth_date,
            client.visit_count,
            on,
            policy.birthday_visit_threshold,
        );
        if !promotion.is_eligible() {
            return Err(DecideError::NotBirthdayEligible);
        }
    }
    Ok(())
}

pub fn decide_booking(
    command: BookAppointment,
    client: &Client,
    barber: &Barber,
    context: &BookingContext,
    policy: &BookingPolicy,
) -> Decision {
    let checks = validate_request(&command, barber, context.today, policy)
        .and_then(|_| check_client_status(client, command.service, command.date, policy));
    if let Err(reason) = checks {
        return Decision::Rejected { reason };
    }
    let Some(phone) = normalize_phone(&command.client_phone) else {
        return Decision::Rejected {
            reason: DecideError::MalformedPhone,
        };
    };

    let client = Client {
        name: command.client_name.trim().to_string(),
        phone,
        ..client.clone()
    };
    let appointment = Appointment {
        id: context.appointment_id.clone(),
        client_id: client.id.clone(),
        barber_id: barber.id.clone(),
        branch: command.branch,
        service: command.service,
        date: command.date,
        time: command.time,
        notes: command.notes.trim().to_string(),
        status: policy.initial_status,
        created_at: context.now,
        is_birthday_booking: command.service.is_birthday_cut(),
    };
    let notification = BarberNotification {
        appointment_id: appointment.id.clone(),
        barber_name: barber.name.clone(),
        barber_phone: barber.phone.clone(),
        client_name: client.name.clone(),
        client_phone: client.phone.clone(),
        branch: appointment.branch,
        service: appointment.service,
        date: appointment.date,
        time: appointment.time,
    };

    Decision::Accepted {
        client,
        appointment,
        notification,
    }
}
