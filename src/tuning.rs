//! Data-driven game balance
//!
//! Probabilities and limits that a host (or a test) may want to pin live
//! here; fixed geometry stays in [`crate::consts`].

use serde::{Deserialize, Serialize};

/// Balance knobs for one run. `Default` is the canonical game.
///
/// All `*_chance` fields are probabilities in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Chance per destroyed enemy of dropping a power-up
    pub power_up_chance: f64,
    /// Chance per eligible enemy per tick of firing
    pub enemy_fire_chance: f64,
    /// Chance per tick of a special target entering while none is live
    pub special_spawn_chance: f64,
    /// Chance of one extra point of splash damage, rolled per barrier cell
    pub splash_luck_chance: f64,
    /// Clearing this level wins the game
    pub max_level: u32,
    /// Whole seconds of lead-in before each level
    pub countdown_seconds: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            power_up_chance: 0.02,
            enemy_fire_chance: 0.001,
            special_spawn_chance: 0.001,
            splash_luck_chance: 0.4,
            max_level: 10,
            countdown_seconds: 3,
        }
    }
}

impl Tuning {
    /// Countdown length in simulation ticks
    pub fn countdown_ticks(&self) -> u32 {
        self.countdown_seconds * crate::consts::TICKS_PER_SECOND
    }
}
