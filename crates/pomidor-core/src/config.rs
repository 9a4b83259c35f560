//! TOML-based application configuration.
//!
//! Stores the timer settings consumed by drivers:
//! - Work and rest phase lengths
//! - Tick cadence for the external scheduler
//!
//! Configuration is stored at `~/.config/pomidor/config.toml`
//! (`~/.config/pomidor-dev/` when `POMIDOR_ENV=dev`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::timer::Durations;

/// Returns `~/.config/pomidor[-dev]/` based on POMIDOR_ENV.
///
/// Set POMIDOR_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMIDOR_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomidor-dev")
    } else {
        base_dir.join("pomidor")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work phase length in minutes.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    /// Rest phase length in minutes.
    #[serde(default = "default_rest_minutes")]
    pub rest_minutes: u64,
    /// Driver tick cadence in seconds.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomidor/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
}

fn default_work_minutes() -> u64 {
    25
}
fn default_rest_minutes() -> u64 {
    5
}
fn default_tick_seconds() -> u64 {
    1
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            rest_minutes: default_rest_minutes(),
            tick_seconds: default_tick_seconds(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults first if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other if other.is_object() => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The new value is parsed
    /// according to the existing value's type, and the resulting config is
    /// re-validated before it is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the updated config fails validation.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check every setting the timer depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.durations()?;
        if self.timer.tick_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.tick_seconds".to_string(),
                message: "tick cadence must be at least one second".to_string(),
            });
        }
        Ok(())
    }

    /// Validated phase lengths for engine construction.
    pub fn durations(&self) -> Result<Durations, ConfigError> {
        Durations::new(
            Duration::from_secs(self.timer.work_minutes.saturating_mul(60)),
            Duration::from_secs(self.timer.rest_minutes.saturating_mul(60)),
        )
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.timer.tick_seconds)
    }
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());

    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse().map_err(
                    |_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as bool"),
                    },
                )?),
                serde_json::Value::Number(_) => {
                    let n: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as number"),
                    })?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::String(_) => serde_json::Value::String(value.to_string()),
                _ => return Err(unknown()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current.get_mut(part).ok_or_else(unknown)?;
    }

    Err(unknown())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_classic_cycle() {
        let cfg = Config::default();
        assert_eq!(cfg.timer.work_minutes, 25);
        assert_eq!(cfg.timer.rest_minutes, 5);
        assert_eq!(cfg.timer.tick_seconds, 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timer.work_minutes, 25);
        assert!(path.exists());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.timer.work_minutes = 50;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timer.work_minutes, 50);
        assert_eq!(loaded.timer.rest_minutes, 5);
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("[timer]\nwork_minutes = 40\n").unwrap();
        assert_eq!(cfg.timer.work_minutes, 40);
        assert_eq!(cfg.timer.rest_minutes, 5);
        assert_eq!(cfg.timer.tick_seconds, 1);
    }

    #[test]
    fn get_by_dotted_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.work_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("timer.bogus"), None);
        assert_eq!(cfg.get("timer"), None);
    }

    #[test]
    fn set_value_round_trips() {
        let mut cfg = Config::default();
        cfg.set_value("timer.rest_minutes", "10").unwrap();
        assert_eq!(cfg.timer.rest_minutes, 10);
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("timer.bogus", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_value_rejects_zero_duration() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("timer.work_minutes", "0"),
            Err(ConfigError::InvalidDuration { field: "work" })
        ));
        // The rejected value is not applied.
        assert_eq!(cfg.timer.work_minutes, 25);
    }

    #[test]
    fn zero_tick_is_invalid() {
        let mut cfg = Config::default();
        cfg.timer.tick_seconds = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn durations_reflect_minutes() {
        let cfg = Config::default();
        let durations = cfg.durations().unwrap();
        assert_eq!(durations.work(), Duration::from_secs(25 * 60));
        assert_eq!(durations.rest(), Duration::from_secs(5 * 60));
    }
}
