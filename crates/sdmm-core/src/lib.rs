//! # SDMM Core
//!
//! Core types for the SDMM map editor.
//! Provides the typed event bus through which panels, dialogs and services
//! talk to each other, the catalog of editor events, and shared error and
//! state types.

pub mod error;
pub mod event_bus;
pub mod types;

pub use error::{DispatchError, Error, Result};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, init_event_bus, Envelope, Event, EventBus, EventBusConfig, EventKind,
    PendingReply, Reaction, Responder, SubscriptionGuard, SubscriptionId, Subscriptions, Trigger,
};

// Re-export type aliases for convenience
pub use types::{thread_safe, thread_safe_none, thread_safe_rw, ThreadSafe, ThreadSafeOption, ThreadSafeRw};
