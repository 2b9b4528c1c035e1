//! The progression engine: experience-driven and stat-driven leveling.
//!
//! Both tracks share the same per-level side effects (auto-gains, stat
//! point grants) and the same hard ceiling at `maxLevel`. The engine
//! borrows the player record mutably for the duration of one call and
//! returns an owned result describing what changed; it never holds state
//! across calls.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::config::LevelingConfig;
use crate::schema::object::ObjectMap;
use crate::schema::player::{Player, PlayerStats};

#[derive(Debug, Error)]
pub enum ProgressionError {
    #[error("experience amount {0} is negative")]
    NegativeAmount(f64),
    #[error("experience amount {0} is not a finite number")]
    NonFiniteAmount(f64),
    #[error("player field '{0}' is not a finite number")]
    NonFinitePlayerField(&'static str),
    #[error("no experience threshold for level {0}")]
    MissingThreshold(u32),
}

/// What triggered a level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelSource {
    Experience,
    Stats,
}

/// One atomic level increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub from_level: u32,
    pub to_level: u32,
    pub source: LevelSource,
}

/// Progress earned on the stat-driven track during one call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatProgression {
    pub stat_gained: f64,
    pub levels_gained: u32,
}

/// What one engine call changed, for the UI layer to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionResult {
    pub levels_gained: u32,
    pub level_ups: Vec<LevelUp>,
    pub stat_progression: Option<StatProgression>,
}

impl ProgressionResult {
    fn empty() -> Self {
        ProgressionResult {
            levels_gained: 0,
            level_ups: Vec::new(),
            stat_progression: None,
        }
    }
}

/// Side effects applied on every individual level increment, regardless of
/// what triggered it. Current Health/Energy are left alone: leveling does
/// not heal.
fn apply_level_up_gains(stats: &mut PlayerStats, config: &LevelingConfig) {
    stats.max_health += config.auto_gains_per_level.max_health;
    stats.max_energy += config.auto_gains_per_level.max_energy;
    stats.unspent_stat_points += config.stat_points_per_level;
}

fn check_player(stats: &PlayerStats) -> Result<(), ProgressionError> {
    match stats.non_finite_field() {
        Some(field) => Err(ProgressionError::NonFinitePlayerField(field)),
        None => Ok(()),
    }
}

/// Raise a high-water mark to `current`, returning the gain above the
/// previous mark. A never-observed peak seeds at `current` with zero gain:
/// stats a player already possessed when first observed grant nothing.
fn raise_peak(peak: &mut Option<f64>, current: f64) -> f64 {
    match *peak {
        Some(previous) if current > previous => {
            *peak = Some(current);
            current - previous
        }
        Some(_) => 0.0,
        None => {
            *peak = Some(current);
            0.0
        }
    }
}

/// Award experience and resolve any level-ups it pays for.
///
/// Adds `amount` to the player's banked experience, then walks the
/// threshold table: each time the bank covers the cost of the next level,
/// the cost is subtracted, the level incremented, and per-level side
/// effects applied. Halts when the bank runs short or `maxLevel` is
/// reached; experience left over at `maxLevel` is discarded, not banked.
///
/// Leaves peak tracking and `CoreStatXP` untouched — callers that also
/// changed base stats or equipment compose this with
/// [`apply_level_progression`].
pub fn add_experience(
    player: &mut Player,
    amount: f64,
    config: &LevelingConfig,
) -> Result<ProgressionResult, ProgressionError> {
    if !amount.is_finite() {
        return Err(ProgressionError::NonFiniteAmount(amount));
    }
    if amount < 0.0 {
        return Err(ProgressionError::NegativeAmount(amount));
    }
    check_player(&player.stats)?;

    let stats = &mut player.stats;
    stats.experience += amount;

    let mut result = ProgressionResult::empty();
    while stats.level < config.max_level {
        let threshold = *config
            .exp_thresholds_to_next
            .get(stats.level as usize)
            .ok_or(ProgressionError::MissingThreshold(stats.level))?;
        if stats.experience < threshold {
            break;
        }
        stats.experience -= threshold;
        apply_level_up_gains(stats, config);
        result.level_ups.push(LevelUp {
            from_level: stats.level,
            to_level: stats.level + 1,
            source: LevelSource::Experience,
        });
        stats.level += 1;
        result.levels_gained += 1;
    }

    if stats.level >= config.max_level {
        stats.experience = 0.0;
    }

    Ok(result)
}

/// Re-scan base stats and equipment bonuses and resolve stat-driven
/// leveling.
///
/// The engine tracks two high-water marks: the best base-stat sum and the
/// best equipment-bonus sum ever observed. Only the increase over a
/// recorded peak counts as new progress, and a peak's first observation
/// seeds it without granting anything — so starting stats don't count, and
/// unequipping never claws back a level (the peak stays put, making
/// re-equip a non-event rather than a repeatable farm).
///
/// Equipped IDs missing from `context` contribute zero bonus; catalogs and
/// equipment lists version independently. With no `context` at all, only
/// base-stat gains apply.
pub fn apply_level_progression(
    player: &mut Player,
    config: &LevelingConfig,
    context: Option<&ObjectMap>,
) -> Result<ProgressionResult, ProgressionError> {
    check_player(&player.stats)?;

    let base_sum = player.stats.base_stat_total();
    let equip_sum = match context {
        Some(objects) => player
            .equipped
            .iter()
            .filter_map(|id| objects.get(id))
            .map(|object| object.bonuses.core_total())
            .sum(),
        None => 0.0,
    };

    let stats = &mut player.stats;
    let base_gain = raise_peak(&mut stats.core_stat_peak_base, base_sum);
    let equip_gain = raise_peak(&mut stats.core_stat_peak_equip, equip_sum);
    let total_gain = base_gain + equip_gain;

    let mut result = ProgressionResult::empty();

    // Peaks update even when stat leveling is disabled, so gains made while
    // disabled cannot be re-counted after a later enable.
    if config.stat_leveling.enabled {
        stats.core_stat_xp += total_gain;
        let threshold = config.stat_leveling.threshold_to_next;
        while stats.core_stat_xp >= threshold && stats.level < config.max_level {
            stats.core_stat_xp -= threshold;
            apply_level_up_gains(stats, config);
            result.level_ups.push(LevelUp {
                from_level: stats.level,
                to_level: stats.level + 1,
                source: LevelSource::Stats,
            });
            stats.level += 1;
            result.levels_gained += 1;
        }
        // At maxLevel the surplus is discarded, keeping CoreStatXP below
        // the threshold after every call.
        if stats.core_stat_xp >= threshold {
            stats.core_stat_xp = 0.0;
        }
    }

    result.stat_progression = Some(StatProgression {
        stat_gained: total_gain,
        levels_gained: result.levels_gained,
    });
    Ok(result)
}
