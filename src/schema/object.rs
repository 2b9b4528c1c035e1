use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Per-stat bonuses an equipped object grants. All fields default to zero
/// so catalogs only list the stats an object actually affects.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatBonuses {
    pub power: f64,
    pub focus: f64,
    pub stealth: f64,
}

impl StatBonuses {
    /// Sum of the stats tracked by stat-driven leveling.
    pub fn core_total(&self) -> f64 {
        self.power + self.focus + self.stealth
    }
}

/// A content-database object record, as far as the progression engine
/// cares: an ID and whatever stat bonuses the object grants when equipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameObject {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bonuses: StatBonuses,
}

/// Object catalog keyed by object ID — the equipment-resolution context.
///
/// Equipment lists and object catalogs are updated independently, so IDs
/// that don't resolve contribute zero bonus rather than erroring.
pub type ObjectMap = FxHashMap<String, GameObject>;
