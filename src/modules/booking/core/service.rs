use serde::{Deserialize, Serialize};

/// Which slot profile a service is scheduled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationClass {
    Ordinary,
    /// Occupies the barber for most of the morning.
    LongDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    StandardCut,
    BeardTrim,
    CutAndBeard,
    Permanent,
    FreeBirthdayCut,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Service::StandardCut,
        Service::BeardTrim,
        Service::CutAndBeard,
        Service::Permanent,
        Service::FreeBirthdayCut,
    ];

    pub fn duration_class(&self) -> DurationClass {
        match self {
            Service::Permanent => DurationClass::LongDuration,
            _ => DurationClass::Ordinary,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Service::StandardCut => "Corte de Pelo",
            Service::BeardTrim => "Barba",
            Service::CutAndBeard => "Corte y Barba",
            Service::Permanent => "Permanente",
            Service::FreeBirthdayCut => "Corte Cumpleaños Gratis",
        }
    }

    pub fn is_birthday_cut(&self) -> bool {
        matches!(self, Service::FreeBirthdayCut)
    }
}
