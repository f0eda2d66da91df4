//! Configuration file handling for SDMM
//!
//! Configuration is organized into sections:
//! - Event bus tuning (dispatch depth, subscription warnings)
//! - Logging (level, output format)
//!
//! Files are JSON or TOML, chosen by extension. The default location is
//! `<platform config dir>/sdmm/config.toml`.

use sdmm_core::EventBusConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SettingsError};

/// Log level threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_directive())
    }
}

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human friendly output
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level, overridden by `RUST_LOG`
    pub level: LogLevel,
    /// Output style
    pub format: LogFormat,
    /// Include thread ids and names
    pub thread_ids: bool,
    /// Include source line numbers
    pub line_numbers: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            thread_ids: true,
            line_numbers: true,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event bus tuning
    pub bus: EventBusConfig,
    /// Logging preferences
    pub logging: LoggingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.bus.validate()?;
        Ok(())
    }

    /// Load from the default location, if this platform has one
    pub fn load_from_default_location() -> Result<Self> {
        Self::load_or_default_in(dirs::config_dir().as_deref())
    }

    /// Load `sdmm/config.toml` under `config_dir`.
    ///
    /// No directory or no file there both give the defaults.
    pub fn load_or_default_in(config_dir: Option<&Path>) -> Result<Self> {
        match config_dir {
            Some(dir) => Self::load_or_default(&Self::path_in(dir)),
            None => {
                tracing::debug!("No config directory for this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join("sdmm").join("config.toml")
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_toml_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");

        let mut config = Config::new();
        config.bus.max_dispatch_depth = 16;
        config.logging.level = LogLevel::Debug;
        config.save_to_file(&path).expect("Should save");

        let loaded = Config::load_from_file(&path).expect("Should load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::new();
        config.logging.format = LogFormat::Compact;
        config.save_to_file(&path).expect("Should save");

        assert_eq!(Config::load_from_file(&path).expect("Should load"), config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"trace\"\n").expect("write");

        let loaded = Config::load_from_file(&path).expect("Should load");
        assert_eq!(loaded.logging.level, LogLevel::Trace);
        assert_eq!(loaded.bus, EventBusConfig::default());
    }

    #[test]
    fn test_invalid_bus_section_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bus]\nmax_dispatch_depth = 0\n").expect("write");

        let err = Config::load_from_file(&path).expect_err("Should reject");
        assert!(matches!(err, SettingsError::Bus(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::new()
            .save_to_file(Path::new("config.yaml"))
            .expect_err("Should reject");
        assert!(matches!(err, SettingsError::UnsupportedFormat(ext) if ext == "yaml"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().expect("temp dir");
        let loaded =
            Config::load_or_default(&dir.path().join("absent.toml")).expect("Should default");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_no_config_directory_gives_defaults() {
        let loaded = Config::load_or_default_in(None).expect("Should default");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_config_directory_is_searched() {
        let dir = tempdir().expect("temp dir");
        let mut config = Config::new();
        config.bus.subscriber_warn_threshold = 8;
        config
            .save_to_file(&dir.path().join("sdmm").join("config.toml"))
            .expect("Should save");

        let loaded = Config::load_or_default_in(Some(dir.path())).expect("Should load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_log_level_directive() {
        assert_eq!(LogLevel::Warn.as_directive(), "warn");
        assert_eq!(LogLevel::default().to_string(), "info");
    }
}
