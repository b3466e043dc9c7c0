use crate::modules::booking::core::service::Service;
use crate::shared::core::branch::Branch;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barber {
    pub id: String,
    pub name: String,
    pub branch: Branch,
    pub phone: String,
    #[serde(default)]
    pub offers_free_birthday_cut: bool,
    /// Weekdays this barber never works, on top of the shop-wide weekend closure.
    #[serde(default)]
    pub blocked_weekdays: Vec<Weekday>,
    #[serde(default)]
    pub long_service_eligible: bool,
}

impl Barber {
    pub fn works_on(&self, weekday: Weekday) -> bool {
        !self.blocked_weekdays.contains(&weekday)
    }

    pub fn can_perform(&self, service: Service) -> bool {
        match service {
            Service::Permanent => self.long_service_eligible,
            Service::FreeBirthdayCut => self.offers_free_birthday_cut,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub branch: Option<Branch>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub visit_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl AppointmentStatus {
    /// Statuses that keep the slot and count towards the client's active limit.
    pub const HOLDING: [AppointmentStatus; 2] =
        [AppointmentStatus::Pending, AppointmentStatus::Confirmed];

    pub fn holds_slot(&self) -> bool {
        Self::HOLDING.contains(self)
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, NoShow)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    pub barber_id: String,
    pub branch: Branch,
    pub service: Service,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub notes: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_birthday_booking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub branch: Branch,
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Promotion {
    pub fn is_visible_on(&self, today: NaiveDate) -> bool {
        self.active && self.ends_on >= today
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppointmentStatus::Pending, AppointmentStatus::Confirmed, true)]
    #[case(AppointmentStatus::Pending, AppointmentStatus::Cancelled, true)]
    #[case(AppointmentStatus::Confirmed, AppointmentStatus::Completed, true)]
    #[case(AppointmentStatus::Confirmed, AppointmentStatus::NoShow, true)]
    #[case(AppointmentStatus::Cancelled, AppointmentStatus::Confirmed, false)]
    #[case(AppointmentStatus::Pending, AppointmentStatus::Completed, false)]
    #[case(AppointmentStatus::Completed, AppointmentStatus::Cancelled, false)]
    fn it_should_only_allow_staff_transitions(
        #[case] from: AppointmentStatus,
        #[case] to: AppointmentStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[rstest]
    fn it_should_hold_the_slot_while_pending_or_confirmed() {
        assert!(AppointmentStatus::Pending.holds_slot());
        assert!(AppointmentStatus::Confirmed.holds_slot());
        assert!(!AppointmentStatus::Cancelled.holds_slot());
        assert!(!AppointmentStatus::NoShow.holds_slot());
    }

    #[rstest]
    fn it_should_match_services_to_barber_capabilities() {
        let barber = Barber {
            id: "b-1".into(),
            name: "Jair".into(),
            branch: Branch::Brasil,
            phone: "912345678".into(),
            offers_free_birthday_cut: false,
            blocked_weekdays: vec![Weekday::Fri, Weekday::Sat],
            long_service_eligible: false,
        };
        assert!(barber.can_perform(Service::StandardCut));
        assert!(!barber.can_perform(Service::Permanent));
        assert!(!barber.can_perform(Service::FreeBirthdayCut));
        assert!(!barber.works_on(Weekday::Fri));
        assert!(barber.works_on(Weekday::Mon));
    }

    #[rstest]
    fn it_should_show_promotions_until_their_last_day() {
        let promotion = Promotion {
            id: "p-1".into(),
            title: "Martes de barba".into(),
            description: "20% en barba".into(),
            starts_on: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            ends_on: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            branch: Branch::Brasil,
            image_url: None,
            active: true,
        };
        assert!(promotion.is_visible_on(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
        assert!(!promotion.is_visible_on(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
    }
}
