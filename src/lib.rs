//! Progression Engine — character leveling rules for narrative RPGs.
//!
//! Interprets a static leveling configuration (experience thresholds,
//! per-level auto-gains, mental stages) against a mutable player record:
//! experience awards and base-stat/equipment changes become level-ups,
//! attribute increases, allocable stat points, and a narrative
//! mental-status classification. Pure and synchronous — the only I/O is
//! config loading.

pub mod core;
pub mod schema;
