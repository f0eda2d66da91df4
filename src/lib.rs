//! # SDMM
//!
//! Headless host for the SDMM map editor's typed event bus.
//!
//! ## Architecture
//!
//! SDMM is organized as a workspace with multiple crates:
//!
//! 1. **sdmm-core** - Typed event bus, event catalog, shared state types
//! 2. **sdmm-settings** - Configuration files for the bus and logging
//! 3. **sdmm** - Logging setup, sample editor services, binary entry point
//!
//! Components never hold references to each other. Panels, dialogs and
//! services each sign the events they care about on a shared
//! [`EventBus`](sdmm_core::EventBus) and post the ones they produce.

pub mod session;

pub use sdmm_core::{
    event_bus, init_event_bus, DispatchError, Envelope, Event, EventBus, EventBusConfig,
    EventKind, Responder, SubscriptionId, Subscriptions,
};
pub use sdmm_settings::{Config, LogFormat, LogLevel, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output in the configured format
/// - RUST_LOG environment variable support, falling back to the configured level
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.level.as_directive()))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(settings.thread_ids)
        .with_thread_names(settings.thread_ids)
        .with_line_number(settings.line_numbers);

    let registry = tracing_subscriber::registry().with(env_filter);
    match settings.format {
        LogFormat::Pretty => registry.with(fmt_layer.pretty()).try_init()?,
        LogFormat::Compact => registry.with(fmt_layer.compact()).try_init()?,
        LogFormat::Json => registry.with(fmt_layer.json()).try_init()?,
    }

    Ok(())
}
