//! Demo configuration and day-file loading.
//!
//! Both files are TOML. Read or parse failures surface as
//! `WayfarerError::ConfigError` naming the file.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use wayfarer_contracts::{
    context::experience::TravelExperienceContext,
    error::{WayfarerError, WayfarerResult},
};

/// Contents of `wayfarer.toml`. Every section is optional.
///
/// ```toml
/// [logging]
/// filter = "wayfarer_experience=debug,warn"
///
/// [audit]
/// enabled = true
/// print_chain = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub logging: LoggingConfig,
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Record every recommendation in a hash-chained sink.
    pub enabled: bool,
    /// Print each chain entry's hash after the run.
    pub print_chain: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            print_chain: false,
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(s: &str) -> WayfarerResult<Self> {
        toml::from_str(s).map_err(|e| WayfarerError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> WayfarerResult<Self> {
        match path {
            Some(path) => Self::from_toml_str(&read(path)?),
            None => Ok(Self::default()),
        }
    }
}

/// Consecutive day counts the caller already knows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryFile {
    pub active_days: u32,
    pub golf_days: u32,
}

/// A day to plan: the orchestrator context plus optional recorded history
/// and actual spend. Without them the placeholder capabilities are used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayFile {
    #[serde(flatten)]
    pub context: TravelExperienceContext,
    #[serde(default)]
    pub history: Option<HistoryFile>,
    #[serde(default)]
    pub actuals: Option<BTreeMap<String, Decimal>>,
}

impl DayFile {
    pub fn from_toml_str(s: &str) -> WayfarerResult<Self> {
        toml::from_str(s).map_err(|e| WayfarerError::ConfigError {
            reason: format!("failed to parse day file TOML: {}", e),
        })
    }

    pub fn load(path: &Path) -> WayfarerResult<Self> {
        Self::from_toml_str(&read(path)?)
    }
}

fn read(path: &Path) -> WayfarerResult<String> {
    std::fs::read_to_string(path).map_err(|e| WayfarerError::ConfigError {
        reason: format!("failed to read '{}': {}", path.display(), e),
    })
}

#[cfg(test)]
mod tests {
    use wayfarer_contracts::context::health::ActivityType;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = DemoConfig::from_toml_str("").unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.logging.filter, "warn");
        assert!(config.audit.enabled);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = DemoConfig::from_toml_str("[audit]\nprint_chain = true\n").unwrap();
        assert!(config.audit.enabled);
        assert!(config.audit.print_chain);
    }

    #[test]
    fn bad_config_is_a_config_error() {
        let err = DemoConfig::from_toml_str("[audit]\nenabled = \"yes\"\n").unwrap_err();
        assert!(err.to_string().contains("configuration error"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = DemoConfig::load(Some(Path::new("/nonexistent/wayfarer.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/wayfarer.toml"));
    }

    #[test]
    fn sample_day_file_parses() {
        let day = DayFile::from_toml_str(include_str!("../day.toml")).unwrap();
        assert_eq!(day.context.envelope.trip_id, "trip-dn-2026");
        assert_eq!(day.context.current_itinerary.primary_intent, ActivityType::Golf);
        assert_eq!(day.context.current_itinerary.available_courses.len(), 3);
        assert_eq!(day.history, Some(HistoryFile { active_days: 3, golf_days: 1 }));
        assert_eq!(day.actuals.unwrap()["golf"], Decimal::new(4200, 0));
    }
}
