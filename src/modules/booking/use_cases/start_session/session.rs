// Per-page booking context.
//
// Built once when the booking page loads and passed to every step instead of reading
// ambient state: who is signed in, their profile, the branch and barber being looked at,
// and the barber list last fetched for that branch.

use crate::modules::booking::core::birthday::{BirthdayPromotion, evaluate_birthday};
use crate::modules::booking::core::calendar::legal_booking_date;
use crate::modules::booking::core::model::{Barber, Client};
use crate::modules::booking::core::service::Service;
use crate::modules::booking::use_cases::book_appointment::command::BookAppointment;
use crate::shared::core::branch::Branch;
use crate::shared::infrastructure::identity::Session;
use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSession {
    pub session: Session,
    pub client: Client,
    pub birthday_visit_threshold: u32,
    pub branch: Option<Branch>,
    pub barbers: Vec<Barber>,
    pub barber: Option<Barber>,
}

impl BookingSession {
    pub fn new(session: Session, client: Client, birthday_visit_threshold: u32) -> Self {
        let branch = client.branch;
        Self {
            session,
            client,
            birthday_visit_threshold,
            branch,
            barbers: Vec::new(),
            barber: None,
        }
    }

    /// A blocked client keeps the session but the booking form stays disabled.
    pub fn can_book(&self) -> bool {
        !self.client.blocked
    }

    pub fn birthday_on(&self, date: NaiveDate) -> BirthdayPromotion {
        evaluate_birthday(
            self.client.birth_date,
            self.client.visit_count,
            date,
            self.birthday_visit_threshold,
        )
    }

    /// The birthday cut is listed only when the birthday falls on the date the form books.
    pub fn offered_services(&self, today: NaiveDate) -> Vec<Service> {
        let eligible = self.birthday_on(self.legal_date(today)).is_eligible();
        Service::ALL
            .into_iter()
            .filter(|s| !s.is_birthday_cut() || eligible)
            .collect()
    }

    pub fn select_branch(&mut self, branch: Branch, barbers: Vec<Barber>) {
        self.branch = Some(branch);
        self.barbers = barbers;
        self.barber = None;
    }

    pub fn select_barber(&mut self, barber_id: &str) -> Option<&Barber> {
        self.barber = self.barbers.iter().find(|b| b.id == barber_id).cloned();
        self.barber.as_ref()
    }

    /// Recomputed on every barber change since weekday exceptions belong to the barber.
    pub fn legal_date(&self, today: NaiveDate) -> NaiveDate {
        legal_booking_date(today, self.barber.as_ref())
    }

    /// The form submission for the current selection, prefilled with the profile contact.
    pub fn booking_form(
        &self,
        service: Service,
        date: NaiveDate,
        time: NaiveTime,
        notes: impl Into<String>,
    ) -> Option<BookAppointment> {
        let branch = self.branch?;
        let barber = self.barber.as_ref()?;
        Some(BookAppointment {
            branch,
            barber_id: barber.id.clone(),
            service,
            date,
            time,
            client_name: self.client.name.clone(),
            client_phone: self.client.phone.clone(),
            notes: notes.into(),
        })
    }
}
