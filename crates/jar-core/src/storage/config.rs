//! TOML-based application configuration.
//!
//! Stores the defaults the capacity engine falls back to:
//! - Nominal weekly hours and overhead factor for profiles that carry none
//! - Weekly overload ratio and per-day overload cap
//!
//! Configuration is stored at `~/.config/the-jar/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::capacity::{
    CapacityEngine, CapacityProfile, CapacityThresholds, DAILY_OVERLOAD_HOURS,
    DEFAULT_NOMINAL_WEEKLY_HOURS, DEFAULT_OVERHEAD_FACTOR, OVERLOAD_THRESHOLD_RATIO,
};
use crate::error::{CapacityError, ConfigError};

/// Default capacity profile values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityConfig {
    #[serde(default = "default_nominal_weekly_hours")]
    pub nominal_weekly_hours: f64,
    #[serde(default = "default_overhead_factor")]
    pub overhead_factor: f64,
}

/// Overload threshold configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_overload_ratio")]
    pub overload_ratio: f64,
    #[serde(default = "default_daily_overload_hours")]
    pub daily_overload_hours: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/the-jar/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub capacity: CapacityConfig,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

fn default_nominal_weekly_hours() -> f64 {
    DEFAULT_NOMINAL_WEEKLY_HOURS
}
fn default_overhead_factor() -> f64 {
    DEFAULT_OVERHEAD_FACTOR
}
fn default_overload_ratio() -> f64 {
    OVERLOAD_THRESHOLD_RATIO
}
fn default_daily_overload_hours() -> f64 {
    DAILY_OVERLOAD_HOURS
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            nominal_weekly_hours: default_nominal_weekly_hours(),
            overhead_factor: default_overhead_factor(),
        }
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            overload_ratio: default_overload_ratio(),
            daily_overload_hours: default_daily_overload_hours(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .trim()
                            .parse::<f64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return (and persist) the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                tracing::debug!(path = %path.display(), "config loaded");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::debug!(path = %path.display(), "default config written");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default config");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// The change is rejected if it would leave an invalid profile or
    /// invalid thresholds behind.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated.validate().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed or
    /// fails validation, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    pub fn validate(&self) -> Result<(), CapacityError> {
        self.profile()?;
        self.thresholds().validate()
    }

    /// Default profile for snapshots without one.
    pub fn profile(&self) -> Result<CapacityProfile, CapacityError> {
        CapacityProfile::new(
            self.capacity.nominal_weekly_hours,
            self.capacity.overhead_factor,
        )
    }

    pub fn thresholds(&self) -> CapacityThresholds {
        CapacityThresholds {
            overload_ratio: self.thresholds.overload_ratio,
            daily_overload_hours: self.thresholds.daily_overload_hours,
        }
    }

    /// Engine configured with these thresholds.
    pub fn engine(&self) -> Result<CapacityEngine, CapacityError> {
        CapacityEngine::with_thresholds(self.thresholds())
    }
}
