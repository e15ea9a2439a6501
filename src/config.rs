//! Field configuration
//!
//! Stored in `~/.config/markfield/config.yaml`. Every setting has a default,
//! so a partial (or missing) file is fine.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tunables for a markdown field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Typing pause after which a pending edit becomes an undo entry
    #[serde(default = "default_commit_pause_ms")]
    pub commit_pause_ms: u64,
    /// Delay before a change is propagated to the host
    #[serde(default = "default_notify_debounce_ms")]
    pub notify_debounce_ms: u64,
    /// Same-action repeats inside this window are dropped
    #[serde(default = "default_action_repeat_ms")]
    pub action_repeat_ms: u64,
    #[serde(default = "default_mention_trigger")]
    pub mention_trigger: char,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Upper bound for toolbar-inserted tables
    #[serde(default = "default_table_max_rows")]
    pub table_max_rows: usize,
    #[serde(default = "default_table_max_cols")]
    pub table_max_cols: usize,
    #[serde(default = "default_notice_duration_ms")]
    pub notice_duration_ms: u64,
}

fn default_commit_pause_ms() -> u64 {
    600
}

fn default_notify_debounce_ms() -> u64 {
    300
}

fn default_action_repeat_ms() -> u64 {
    100
}

fn default_mention_trigger() -> char {
    '@'
}

fn default_history_limit() -> usize {
    crate::editable::DEFAULT_MAX_ENTRIES
}

fn default_table_max_rows() -> usize {
    10
}

fn default_table_max_cols() -> usize {
    5
}

fn default_notice_duration_ms() -> u64 {
    3000
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            commit_pause_ms: default_commit_pause_ms(),
            notify_debounce_ms: default_notify_debounce_ms(),
            action_repeat_ms: default_action_repeat_ms(),
            mention_trigger: default_mention_trigger(),
            history_limit: default_history_limit(),
            table_max_rows: default_table_max_rows(),
            table_max_cols: default_table_max_cols(),
            notice_duration_ms: default_notice_duration_ms(),
        }
    }
}

impl FieldConfig {
    /// Load config from the user config dir, or return defaults
    ///
    /// Read and parse failures are logged and fall back to defaults.
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn commit_pause(&self) -> Duration {
        Duration::from_millis(self.commit_pause_ms)
    }

    pub fn notify_debounce(&self) -> Duration {
        Duration::from_millis(self.notify_debounce_ms)
    }

    pub fn action_repeat(&self) -> Duration {
        Duration::from_millis(self.action_repeat_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }

    /// Clamp a requested table size to the configured caps (and at least 1x1)
    pub fn clamp_table(&self, rows: usize, cols: usize) -> (usize, usize) {
        (
            rows.clamp(1, self.table_max_rows.max(1)),
            cols.clamp(1, self.table_max_cols.max(1)),
        )
    }
}
