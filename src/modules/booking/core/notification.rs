// Barber hand-off payload. After a booking is persisted the barber is messaged through a
// WhatsApp deep link carrying a plain-text summary of the appointment.

use crate::modules::booking::core::service::Service;
use crate::shared::core::branch::Branch;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long-form Chilean date, e.g. "10 de junio de 2025".
pub fn format_date_es(date: NaiveDate) -> String {
    let month = MONTHS_ES[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarberNotification {
    pub appointment_id: String,
    pub barber_name: String,
    pub barber_phone: String,
    pub client_name: String,
    pub client_phone: String,
    pub branch: Branch,
    pub service: Service,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl BarberNotification {
    pub fn message(&self) -> String {
        format!(
            "¡Hola, {}! Soy {}. He agendado una cita contigo en la sede {} para el día {} a las {}. El servicio es \"{}\". ¡Nos vemos!",
            self.barber_name,
            self.client_name,
            self.branch.display_name(),
            format_date_es(self.date),
            self.time.format("%H:%M"),
            self.service.label(),
        )
    }

    pub fn deep_link(&self, country_code: &str) -> String {
        let phone: String = self
            .barber_phone
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        format!(
            "https://wa.me/+{}{}?text={}",
            country_code,
            phone,
            urlencoding::encode(&self.message())
        )
    }
}
