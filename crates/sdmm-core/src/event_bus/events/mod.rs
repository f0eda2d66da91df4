//! Event type definitions for the event bus.
//!
//! Events are grouped the way the editor names them: `reaction` for
//! notifications and `trigger` for requests, each split by the service or
//! UI area that owns them. Events are cloneable and serializable for
//! logging and replay.

pub mod model;
pub mod reaction;
pub mod trigger;

pub use model::{Environment, EnvironmentItem, MapPosition, SearchResult, UnknownType};
