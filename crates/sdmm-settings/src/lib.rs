//! SDMM Settings Crate
//!
//! Handles application configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, LogFormat, LogLevel, LoggingSettings};
pub use error::{Result, SettingsError};
