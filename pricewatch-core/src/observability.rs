//! Tracing setup shared by the pricewatch binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Must be called once at application startup before any other
/// operations. Log verbosity follows `RUST_LOG`, defaulting to `info`.
///
/// # Panics
/// Panics if called more than once.
pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(true).with_level(true))
        .init();
}
