//! Event bus configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the event bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Maximum nesting of posts made from inside handlers.
    ///
    /// Counted per bus and per thread: posts on another bus nested inside
    /// this one's dispatch do not use up this limit.
    pub max_dispatch_depth: usize,
    /// Warn when one event type gathers more handlers than this.
    pub subscriber_warn_threshold: usize,
    /// Log every dispatch at debug level instead of trace.
    pub trace_dispatch: bool,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            max_dispatch_depth: 64,
            subscriber_warn_threshold: 256,
            trace_dispatch: false,
        }
    }
}

impl EventBusConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_dispatch_depth == 0 {
            return Err(Error::invalid_config("max_dispatch_depth must be > 0"));
        }

        if self.subscriber_warn_threshold == 0 {
            return Err(Error::invalid_config(
                "subscriber_warn_threshold must be > 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EventBusConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = EventBusConfig {
            max_dispatch_depth: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EventBusConfig =
            serde_json::from_str(r#"{ "trace_dispatch": true }"#).expect("Should parse");
        assert!(config.trace_dispatch);
        assert_eq!(config.max_dispatch_depth, 64);
    }
}
