use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("no unspent stat points available")]
    NoUnspentPoints,
}

/// A base stat a player can sink allocable points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreStat {
    Power,
    Focus,
    Stealth,
}

/// Mutable progression state of one player character.
///
/// Field names mirror the save-data JSON, which uses PascalCase. Numeric
/// fields are deliberately NOT defaulted on deserialization: a save record
/// missing one of them is an integration bug and should fail loudly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerStats {
    pub level: u32,
    pub experience: f64,
    pub power: f64,
    pub focus: f64,
    pub stealth: f64,
    /// Derived weapon bonus; carried in the record but not leveling-relevant.
    #[serde(rename = "MS")]
    pub ms: f64,
    /// Highest base-stat sum ever observed. `None` means never observed:
    /// the first progression call seeds it without granting progress, so
    /// stats a character was created with don't count as gains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_stat_peak_base: Option<f64>,
    /// Highest equipment-bonus sum ever observed; same seeding rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_stat_peak_equip: Option<f64>,
    #[serde(rename = "CoreStatXP")]
    pub core_stat_xp: f64,
    pub unspent_stat_points: u32,
    pub health: f64,
    pub max_health: f64,
    pub energy: f64,
    pub max_energy: f64,
}

impl PlayerStats {
    /// Sum of the base stats tracked by stat-driven leveling.
    pub fn base_stat_total(&self) -> f64 {
        self.power + self.focus + self.stealth
    }

    /// Spend one banked stat point on a base stat.
    ///
    /// This is the player-driven allocation action; the engine itself only
    /// ever grants points. The raised stat counts as a gain on the next
    /// level-progression call.
    pub fn allocate_stat_point(&mut self, stat: CoreStat) -> Result<(), AllocationError> {
        if self.unspent_stat_points == 0 {
            return Err(AllocationError::NoUnspentPoints);
        }
        self.unspent_stat_points -= 1;
        match stat {
            CoreStat::Power => self.power += 1.0,
            CoreStat::Focus => self.focus += 1.0,
            CoreStat::Stealth => self.stealth += 1.0,
        }
        Ok(())
    }

    /// Name of the first leveling-relevant field holding a non-finite
    /// value, if any. Used by the engine to reject corrupt records.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let fields = [
            ("Experience", self.experience),
            ("Power", self.power),
            ("Focus", self.focus),
            ("Stealth", self.stealth),
            ("CoreStatPeakBase", self.core_stat_peak_base.unwrap_or(0.0)),
            ("CoreStatPeakEquip", self.core_stat_peak_equip.unwrap_or(0.0)),
            ("CoreStatXP", self.core_stat_xp),
            ("MaxHealth", self.max_health),
            ("MaxEnergy", self.max_energy),
        ];
        fields
            .iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| *name)
    }
}

/// A player record: progression stats plus the equipped-object ID list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub stats: PlayerStats,
    #[serde(default)]
    pub equipped: Vec<String>,
}
