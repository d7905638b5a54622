//! TOML-based application configuration.
//!
//! Stores:
//! - Countdown tick length and evaluation delay
//! - Default evaluator, model and seed for scoring
//! - Sample-history size and seed for the leaderboard and progress views
//!
//! Configuration is stored at `~/.config/promptonium/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scoring::{EvaluatorKind, ModelKind};

/// Countdown and submission timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Wall-clock length of one countdown second.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Artificial evaluation latency after a submission starts.
    #[serde(default = "default_submission_delay_ms")]
    pub submission_delay_ms: u64,
}

/// Scoring defaults used when the CLI is not told otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub evaluator: EvaluatorKind,
    #[serde(default)]
    pub model: ModelKind,
    /// Fixed RNG seed for the simulated evaluator. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Generated attempt history backing the leaderboard and progress views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_sample_attempts")]
    pub sample_attempts: u32,
    #[serde(default = "default_history_seed")]
    pub seed: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/promptonium/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

fn is_unset(value: &str) -> bool {
    matches!(value, "none" | "null" | "")
}

fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_submission_delay_ms() -> u64 {
    2000
}
fn default_sample_attempts() -> u32 {
    75
}
fn default_history_seed() -> u64 {
    42
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            submission_delay_ms: default_submission_delay_ms(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            evaluator: EvaluatorKind::default(),
            model: ModelKind::default(),
            seed: None,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            sample_attempts: default_sample_attempts(),
            seed: default_history_seed(),
        }
    }
}

/// Returns `~/.config/promptonium[-dev]/` based on PROMPTONIUM_ENV.
///
/// Set PROMPTONIUM_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PROMPTONIUM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("promptonium-dev")
    } else {
        base_dir.join("promptonium")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
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

    fn parse_leaf(
        key: &str,
        existing: &serde_json::Value,
        value: &str,
    ) -> Result<serde_json::Value, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let parsed = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) if is_unset(value) => serde_json::Value::Null,
            serde_json::Value::Number(_) => value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
            // Unset optional: accept a number, or "none" to keep it unset.
            serde_json::Value::Null if is_unset(value) => serde_json::Value::Null,
            serde_json::Value::Null => {
                value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .unwrap_or_else(|_| serde_json::Value::String(value.into()))
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("not a leaf key".into()));
            }
            serde_json::Value::String(_) => serde_json::Value::String(value.into()),
        };
        Ok(parsed)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;
                let new_value = Self::parse_leaf(key, existing, value)?;
                obj.insert(part.to_string(), new_value);
                return Ok(());
            }
            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Location of the user's config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the user's config file, or defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| load_failed(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to the user's config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
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

    /// Set a value in memory by dot-separated key. The caller saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Every leaf key with its current value, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }
}
