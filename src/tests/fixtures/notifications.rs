use crate::modules::booking::core::notification::BarberNotification;
use crate::modules::booking::core::service::Service;
use crate::shared::core::branch::Branch;
use chrono::{NaiveDate, NaiveTime};

pub fn make_barber_notification() -> BarberNotification {
    BarberNotification {
        appointment_id: "appt-0001".into(),
        barber_name: "Carlos".into(),
        barber_phone: "987654321".into(),
        client_name: "Camila Soto".into(),
        client_phone: "912345678".into(),
        branch: Branch::Brasil,
        service: Service::StandardCut,
        date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
    }
}
