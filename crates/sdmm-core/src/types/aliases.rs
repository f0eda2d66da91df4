//! Type aliases for state shared with event handlers.
//!
//! Handlers signed on the bus must be `Send + Sync`, so component state they
//! touch lives behind `Arc<Mutex<T>>` or `Arc<RwLock<T>>`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sdmm_core::types::*;
//!
//! let state: ThreadSafe<PanelState> = thread_safe(PanelState::default());
//! let handler_state = state.clone();
//! bus.sign::<EnvironmentReset, _>(move |_| handler_state.lock().clear());
//! ```

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for state touched by handlers.
///
/// Uses `parking_lot::Mutex`, which never poisons, so a panicking handler
/// does not wedge the component.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A thread-safe optional wrapper for state filled in by a later event.
pub type ThreadSafeOption<T> = Arc<Mutex<Option<T>>>;

/// A thread-safe reader-writer lock wrapper for read-heavy state.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// Create a new `ThreadSafe<T>`
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}

/// Create an empty `ThreadSafeOption<T>`
#[inline]
pub fn thread_safe_none<T>() -> ThreadSafeOption<T> {
    Arc::new(Mutex::new(None))
}

/// Create a new `ThreadSafeRw<T>`
#[inline]
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_safe() {
        let state = thread_safe(vec![1, 2]);
        state.lock().push(3);
        assert_eq!(*state.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_thread_safe_none() {
        let slot: ThreadSafeOption<String> = thread_safe_none();
        assert!(slot.lock().is_none());
        *slot.lock() = Some("station.dme".to_string());
        assert_eq!(slot.lock().as_deref(), Some("station.dme"));
    }

    #[test]
    fn test_thread_safe_rw() {
        let state = thread_safe_rw(5);
        assert_eq!(*state.read(), 5);
        *state.write() = 6;
        assert_eq!(*state.read(), 6);
    }
}
