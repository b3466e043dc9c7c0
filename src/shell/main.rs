use barberia_booking::modules::booking::core::calendar::legal_booking_date;
use barberia_booking::modules::booking::core::service::DurationClass;
use barberia_booking::modules::booking::core::slots::generate_slots;
use barberia_booking::shell::{bootstrap, telemetry};
use chrono::Local;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let app = bootstrap()?;
    let today = Local::now().date_naive();
    let slots = generate_slots(DurationClass::Ordinary, &app.policy.slots);

    tracing::info!(
        legal_date = %legal_booking_date(today, None),
        ordinary_slots = slots.len(),
        "booking engine ready"
    );
    Ok(())
}
