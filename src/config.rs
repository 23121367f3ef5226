use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extraction::Vocabulary;

/// Application-level constants
pub const APP_NAME: &str = "SmartFlow";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable pointing at a JSON config file.
pub const CONFIG_ENV_VAR: &str = "SMARTFLOW_CONFIG";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "smartflow=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),
}

/// Routing thresholds for the flow classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thresholds {
    /// A returning patient seen fewer than this many whole days ago gets the evolution route.
    pub evolution_window_days: i64,
    /// Maximum reported symptoms for the quick route.
    pub quick_max_symptoms: usize,
    /// Patients strictly older than this get a geriatric assessment suggestion.
    pub geriatric_age: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            evolution_window_days: 30,
            quick_max_symptoms: 2,
            geriatric_age: 65,
        }
    }
}

/// Full engine configuration. Every field falls back to its default when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartFlowConfig {
    pub thresholds: Thresholds,
    pub vocabulary: Vocabulary,
}

impl SmartFlowConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.vocabulary.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "Loaded smart flow config");
        Ok(config)
    }

    /// Load from the file named by `SMARTFLOW_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(Path::new(path.trim())),
            _ => {
                tracing::debug!("{CONFIG_ENV_VAR} not set, using built-in config");
                Ok(Self::default())
            }
        }
    }
}
