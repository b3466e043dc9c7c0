use crate::modules::booking::core::policy::BookingPolicy;
use anyhow::Context;
use config::{Config, Environment, File};

/// Reads the booking policy.
///
/// Sources, later ones overriding earlier ones:
/// - built-in defaults,
/// - `config/booking.{toml,yaml,json}` when present,
/// - `BARBERIA__*` environment variables, e.g. `BARBERIA__SLOTS__AFTERNOON_CUTOFF=16:30:00`.
pub fn load_policy() -> anyhow::Result<BookingPolicy> {
    let _ = dotenvy::dotenv();
    load_policy_from(Environment::with_prefix("BARBERIA"))
}

fn load_policy_from(environment: Environment) -> anyhow::Result<BookingPolicy> {
    let config = Config::builder()
        .add_source(File::with_name("config/booking").required(false))
        .add_source(
            environment
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("slots.long_service_starts")
                .try_parsing(true),
        )
        .build()
        .context("could not read booking configuration")?;
    config
        .try_deserialize()
        .context("invalid booking configuration")
}
