//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Arc<Mutex<T>>` and friends used by components
//!   that keep state for their event handlers.

pub mod aliases;

pub use aliases::*;
