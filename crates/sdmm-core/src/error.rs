//! Error handling for the SDMM core
//!
//! Provides the error types surfaced by the event bus:
//! - Dispatch errors (handler failures, runaway re-entrant posting)
//! - Core errors (bus initialisation and configuration)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Error returned from a dispatch.
///
/// Handler failures are carried through unmodified: `Display` and `source()`
/// are those of the error the handler returned, and the original value can be
/// recovered with [`DispatchError::into_handler_error`] and downcast.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A handler returned an error; handlers after it did not run.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),

    /// Re-entrant posting nested deeper than the configured limit.
    #[error("Dispatch depth limit of {limit} exceeded while posting {event}")]
    DepthExceeded {
        /// Name of the event whose dispatch was refused.
        event: &'static str,
        /// The configured nesting limit.
        limit: usize,
    },
}

impl DispatchError {
    /// Returns the handler error, if this dispatch failed inside a handler.
    pub fn into_handler_error(self) -> Option<anyhow::Error> {
        match self {
            DispatchError::Handler(err) => Some(err),
            DispatchError::DepthExceeded { .. } => None,
        }
    }

    /// Check if the dispatch was refused by the depth guard
    pub fn is_depth_exceeded(&self) -> bool {
        matches!(self, DispatchError::DepthExceeded { .. })
    }
}

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The process-wide bus was already created.
    #[error("Global event bus is already initialized")]
    AlreadyInitialized,

    /// A configuration value is out of range.
    #[error("Invalid event bus configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create an invalid-configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig(message.into())
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("map file is locked")]
    struct MapLocked;

    #[test]
    fn test_handler_error_is_transparent() {
        let err = DispatchError::from(anyhow::Error::new(MapLocked));
        assert_eq!(err.to_string(), "map file is locked");

        let inner = err.into_handler_error().expect("handler error");
        assert!(inner.downcast_ref::<MapLocked>().is_some());
    }

    #[test]
    fn test_depth_exceeded_display() {
        let err = DispatchError::DepthExceeded {
            event: "EnvironmentChanged",
            limit: 8,
        };
        assert!(err.is_depth_exceeded());
        assert_eq!(
            err.to_string(),
            "Dispatch depth limit of 8 exceeded while posting EnvironmentChanged"
        );
        assert!(err.into_handler_error().is_none());
    }

    #[test]
    fn test_core_error_display() {
        assert_eq!(
            Error::AlreadyInitialized.to_string(),
            "Global event bus is already initialized"
        );
        assert_eq!(
            Error::invalid_config("max_dispatch_depth must be > 0").to_string(),
            "Invalid event bus configuration: max_dispatch_depth must be > 0"
        );
    }
}
