//! Mental-stage classification — maps a level to its narrative stage.
//!
//! Computed on demand for display; never stored on the player record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::config::LevelingConfig;

#[derive(Debug, Error)]
pub enum MentalStatusError {
    #[error("level {level} is outside the configured range [0, {max_level}]")]
    LevelOutOfRange { level: u32, max_level: u32 },
    #[error("no mental stage covers level {0}")]
    NoStageForLevel(u32),
}

/// Resolved mental status for one level, ready for the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalStatus {
    pub level: u32,
    pub stage_type: String,
    /// Human-readable label: the stage type, suffixed with the 1-based
    /// in-stage position when the stage spans more than one level.
    pub display: String,
    pub description: Option<String>,
    pub media: String,
}

/// Look up the mental status for a level.
///
/// The first stage whose `levels` set contains the level wins, so stage
/// order in the config is significant when stages overlap. Levels beyond
/// `maxLevel` are rejected rather than clamped; a level inside the range
/// with no covering stage is a data-integrity fault the config validator
/// should have caught.
pub fn mental_status_for_level(
    config: &LevelingConfig,
    level: u32,
) -> Result<MentalStatus, MentalStatusError> {
    if level > config.max_level {
        return Err(MentalStatusError::LevelOutOfRange {
            level,
            max_level: config.max_level,
        });
    }

    let stage = config
        .mental_stages
        .iter()
        .find(|stage| stage.levels.contains(&level))
        .ok_or(MentalStatusError::NoStageForLevel(level))?;

    // Zero-based position of this level within the stage's own sequence.
    let position = stage
        .levels
        .iter()
        .position(|&l| l == level)
        .unwrap_or(0);

    let display = if stage.levels.len() > 1 {
        format!("{} {}", stage.stage_type, position + 1)
    } else {
        stage.stage_type.clone()
    };

    let description = match &stage.description_by_level_in_stage {
        Some(texts) if !texts.is_empty() => {
            // Clamp: stages may span more levels than they have texts.
            let index = position.min(texts.len() - 1);
            Some(texts[index].clone())
        }
        _ => stage.description.clone(),
    };

    Ok(MentalStatus {
        level,
        stage_type: stage.stage_type.clone(),
        display,
        description,
        media: stage.media.clone(),
    })
}
