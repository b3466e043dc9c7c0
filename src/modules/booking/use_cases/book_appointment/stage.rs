/// Where a booking attempt currently is. Steps only move forward and end in
/// `Succeeded` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookingStage {
    #[default]
    Idle,
    ValidatingDate,
    CheckingClientStatus,
    CheckingConflicts,
    PersistingProfile,
    PersistingAppointment,
    Succeeded {
        appointment_id: String,
    },
    Failed {
        reason: String,
    },
}

impl BookingStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStage::Succeeded { .. } | BookingStage::Failed { .. })
    }

    pub fn is_persisting(&self) -> bool {
        matches!(
            self,
            BookingStage::PersistingProfile | BookingStage::PersistingAppointment
        )
    }
}
