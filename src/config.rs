use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Tunables for the undo/redo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Maximum number of entries kept on each of the undo and redo stacks.
    pub max_depth: usize,
    /// Quiet period after the last edit before a snapshot is recorded.
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: 50,
            debounce_ms: 500,
        }
    }
}

impl HistoryConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Tunables for condition tree validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConditionConfig {
    /// Deepest allowed group nesting, with the root sequence at depth 0.
    pub max_depth: usize,
    /// Skip the missing-value check for `IS NULL` / `IS NOT NULL`.
    pub allow_valueless_null_checks: bool,
}

impl Default for ConditionConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            allow_valueless_null_checks: false,
        }
    }
}

/// Configuration of one editor session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history: HistoryConfig,
    pub conditions: ConditionConfig,
}

impl EditorConfig {
    /// Load the configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
