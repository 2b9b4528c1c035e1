//! Leveling configuration — types, JSON loading, and load-time validation.
//!
//! The config is trusted static content: it is validated once when loaded
//! and never re-validated per call, so the engine's hot paths stay
//! allocation-free and side-effect-scoped to the player record.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expThresholdsToNext has {found} entries, expected maxLevel = {expected}")]
    ThresholdCountMismatch { found: usize, expected: usize },
    #[error("expThresholdsToNext[{index}] = {value} is not a positive finite number")]
    InvalidThreshold { index: usize, value: f64 },
    #[error("statLeveling.thresholdToNext = {0} is not a positive finite number")]
    InvalidStatThreshold(f64),
    #[error("no mental stage covers level {0}")]
    UncoveredLevel(u32),
    #[error("mental stage '{0}' has an empty levels set")]
    EmptyStage(String),
}

/// Flat stat increases applied on every level-up, regardless of trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoGains {
    pub max_health: f64,
    pub max_energy: f64,
}

/// Rules for the stat-driven leveling track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLeveling {
    pub enabled: bool,
    pub threshold_to_next: f64,
    pub points_per_level: u32,
}

/// A narrative classification bucket mapped from a set of levels.
///
/// Stages partition `[0, maxLevel]`; the union of all `levels` sets must
/// cover every level (overlap is tolerated, first match wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalStage {
    #[serde(rename = "type")]
    pub stage_type: String,
    pub levels: Vec<u32>,
    pub media: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_by_level_in_stage: Option<Vec<String>>,
}

/// Immutable leveling rules loaded from content data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelingConfig {
    pub max_level: u32,
    pub exp_thresholds_to_next: Vec<f64>,
    pub mental_stages: Vec<MentalStage>,
    pub auto_gains_per_level: AutoGains,
    pub stat_leveling: StatLeveling,
    pub stat_points_per_level: u32,
}

impl LevelingConfig {
    /// Load a leveling config from a JSON file and validate it.
    pub fn load_from_json(path: &Path) -> Result<LevelingConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_json(&contents)
    }

    /// Parse a leveling config from a JSON string and validate it.
    pub fn parse_json(input: &str) -> Result<LevelingConfig, ConfigError> {
        let config: LevelingConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Content-integrity check, run once at load time.
    ///
    /// Malformed configs are author-time faults and fail fast here rather
    /// than being clamped at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.max_level as usize;
        if self.exp_thresholds_to_next.len() != expected {
            return Err(ConfigError::ThresholdCountMismatch {
                found: self.exp_thresholds_to_next.len(),
                expected,
            });
        }

        for (index, &value) in self.exp_thresholds_to_next.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidThreshold { index, value });
            }
        }

        let stat_threshold = self.stat_leveling.threshold_to_next;
        if !(stat_threshold.is_finite() && stat_threshold > 0.0) {
            return Err(ConfigError::InvalidStatThreshold(stat_threshold));
        }

        for stage in &self.mental_stages {
            if stage.levels.is_empty() {
                return Err(ConfigError::EmptyStage(stage.stage_type.clone()));
            }
        }

        for level in 0..=self.max_level {
            if !self
                .mental_stages
                .iter()
                .any(|stage| stage.levels.contains(&level))
            {
                return Err(ConfigError::UncoveredLevel(level));
            }
        }

        Ok(())
    }
}
