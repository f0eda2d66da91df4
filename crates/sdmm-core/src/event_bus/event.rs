//! Event type markers.
//!
//! Every event is its own nominal type. The bus keys subscriptions by the
//! Rust type, so two events with identical payload shapes never share
//! handlers.

use serde::{Deserialize, Serialize};
use std::any::type_name;

/// Convention an event type follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Informational broadcast. No reply.
    Reaction,
    /// Request for an action, optionally answered with a reply.
    Trigger,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Reaction => write!(f, "Reaction"),
            EventKind::Trigger => write!(f, "Trigger"),
        }
    }
}

/// A type that can be posted on the [`EventBus`](super::EventBus).
///
/// Implement it with the [`reaction!`](crate::reaction) or
/// [`trigger!`](crate::trigger) macros rather than by hand.
pub trait Event: Send + Sync + 'static {
    /// Value a handler may hand back to the poster. `()` for reactions.
    type Reply: Send + 'static;

    /// Convention this event follows.
    fn kind() -> EventKind;

    /// Short type name used in logs and errors.
    fn name() -> &'static str {
        short_type_name(type_name::<Self>())
    }
}

/// Marker for notification events. Handlers cannot reply to these.
pub trait Reaction: Event<Reply = ()> {}

/// Marker for request events. Handlers may reply once per dispatch.
pub trait Trigger: Event {}

fn short_type_name(full: &'static str) -> &'static str {
    // Generic parameters would confuse a plain rsplit
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}

/// Declare one or more types as [`Reaction`] events.
///
/// ```rust,ignore
/// pub struct EnvironmentReset;
/// sdmm_core::reaction!(EnvironmentReset);
/// ```
#[macro_export]
macro_rules! reaction {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::event_bus::Event for $ty {
                type Reply = ();

                fn kind() -> $crate::event_bus::EventKind {
                    $crate::event_bus::EventKind::Reaction
                }
            }

            impl $crate::event_bus::Reaction for $ty {}
        )+
    };
}

/// Declare one or more types as [`Trigger`] events with their reply type.
///
/// ```rust,ignore
/// pub struct FetchOpenedEnvironment;
/// sdmm_core::trigger!(FetchOpenedEnvironment => Environment);
/// ```
#[macro_export]
macro_rules! trigger {
    ($($ty:ty => $reply:ty),+ $(,)?) => {
        $(
            impl $crate::event_bus::Event for $ty {
                type Reply = $reply;

                fn kind() -> $crate::event_bus::EventKind {
                    $crate::event_bus::EventKind::Trigger
                }
            }

            impl $crate::event_bus::Trigger for $ty {}
        )+
    };
}
