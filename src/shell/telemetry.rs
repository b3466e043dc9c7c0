use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber. Filtering follows `RUST_LOG`.
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
