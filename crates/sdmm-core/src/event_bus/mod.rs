//! # Event Bus Module
//!
//! Typed, synchronous publish/subscribe for decoupled communication between
//! editor components.
//!
//! ## Overview
//!
//! - Every event is its own Rust type; handlers are keyed by that type
//! - `reaction` events are notifications, `trigger` events are requests
//!   that may be answered with a reply
//! - [`EventBus::post`] runs every handler in signing order before it
//!   returns, and hands back the first reply written
//! - Handlers may post, sign and unsign while a dispatch is running; the
//!   running dispatch works on a snapshot of the handler list
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sdmm_core::event_bus::{EventBus, events::reaction::environment::EnvironmentChanged};
//! use sdmm_core::event_bus::events::trigger::environment::FetchOpenedEnvironment;
//!
//! let bus = EventBus::new();
//!
//! // Subscribe to a notification
//! let subscription = bus.sign::<EnvironmentChanged, _>(|event| {
//!     println!("Environment: {}", event.0.name);
//! });
//!
//! // Ask a question; nobody may be listening
//! match bus.post(FetchOpenedEnvironment)? {
//!     Some(environment) => println!("Open: {}", environment.name),
//!     None => println!("No environment open"),
//! }
//!
//! // Unsubscribe when done
//! bus.unsign(subscription);
//! ```

mod bus;
mod config;
mod envelope;
mod event;
pub mod events;
mod registry;
mod subscription;

pub use bus::*;
pub use config::EventBusConfig;
pub use envelope::{Envelope, PendingReply, Responder};
pub use event::{Event, EventKind, Reaction, Trigger};
pub use registry::SubscriptionId;
pub use subscription::{SubscriptionGuard, Subscriptions};
