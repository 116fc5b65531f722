use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read prioritization config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse prioritization config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid prioritization config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TS)]
pub struct PrioritizationConfig {
    #[serde(default = "PrioritizationConfig::default_urgent_threshold")]
    pub urgent_threshold: f64,
    #[serde(default = "PrioritizationConfig::default_stale_after_days")]
    pub stale_after_days: u16,
    #[serde(default = "PrioritizationConfig::default_recompute_interval_secs")]
    pub recompute_interval_secs: u64,
    #[serde(default = "PrioritizationConfig::default_batch_concurrency")]
    pub batch_concurrency: usize,
    #[serde(default = "PrioritizationConfig::default_overdue_action_limit")]
    pub overdue_action_limit: usize,
    #[serde(default = "PrioritizationConfig::default_unassigned_action_limit")]
    pub unassigned_action_limit: usize,
    #[serde(default = "PrioritizationConfig::default_stale_action_limit")]
    pub stale_action_limit: usize,
}

impl PrioritizationConfig {
    const DEFAULT_URGENT_THRESHOLD: f64 = 70.0;
    const DEFAULT_STALE_AFTER_DAYS: u16 = 14;
    const DEFAULT_RECOMPUTE_INTERVAL_SECS: u64 = 3600;
    const DEFAULT_BATCH_CONCURRENCY: usize = 8;
    const DEFAULT_OVERDUE_ACTION_LIMIT: usize = 10;
    const DEFAULT_UNASSIGNED_ACTION_LIMIT: usize = 5;
    const DEFAULT_STALE_ACTION_LIMIT: usize = 5;

    const fn default_urgent_threshold() -> f64 {
        Self::DEFAULT_URGENT_THRESHOLD
    }

    const fn default_stale_after_days() -> u16 {
        Self::DEFAULT_STALE_AFTER_DAYS
    }

    const fn default_recompute_interval_secs() -> u64 {
        Self::DEFAULT_RECOMPUTE_INTERVAL_SECS
    }

    const fn default_batch_concurrency() -> usize {
        Self::DEFAULT_BATCH_CONCURRENCY
    }

    const fn default_overdue_action_limit() -> usize {
        Self::DEFAULT_OVERDUE_ACTION_LIMIT
    }

    const fn default_unassigned_action_limit() -> usize {
        Self::DEFAULT_UNASSIGNED_ACTION_LIMIT
    }

    const fn default_stale_action_limit() -> usize {
        Self::DEFAULT_STALE_ACTION_LIMIT
    }

    pub fn recompute_interval(&self) -> Duration {
        Duration::from_secs(self.recompute_interval_secs)
    }

    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.stale_after_days))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.urgent_threshold) {
            return Err(ConfigError::Invalid(format!(
                "urgent_threshold must be within 0-100, got {}",
                self.urgent_threshold
            )));
        }
        if self.batch_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "batch_concurrency must be at least 1".to_string(),
            ));
        }
        if self.recompute_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "recompute_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the config from the assets directory, falling back to defaults.
    pub fn load() -> Self {
        let path = match utils::assets::config_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("No assets directory for prioritization config: {}", e);
                return Self::default();
            }
        };

        if !path.exists() {
            tracing::debug!("No prioritization config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Prioritization config unusable ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

impl From<String> for PrioritizationConfig {
    fn from(raw_config: String) -> Self {
        match serde_json::from_str::<Self>(&raw_config) {
            Ok(config) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    tracing::warn!("{}, using default", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to parse prioritization config: {}, using default", e);
                Self::default()
            }
        }
    }
}

impl Default for PrioritizationConfig {
    fn default() -> Self {
        Self {
            urgent_threshold: Self::DEFAULT_URGENT_THRESHOLD,
            stale_after_days: Self::DEFAULT_STALE_AFTER_DAYS,
            recompute_interval_secs: Self::DEFAULT_RECOMPUTE_INTERVAL_SECS,
            batch_concurrency: Self::DEFAULT_BATCH_CONCURRENCY,
            overdue_action_limit: Self::DEFAULT_OVERDUE_ACTION_LIMIT,
            unassigned_action_limit: Self::DEFAULT_UNASSIGNED_ACTION_LIMIT,
            stale_action_limit: Self::DEFAULT_STALE_ACTION_LIMIT,
        }
    }
}
