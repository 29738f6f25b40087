//! Nova Invaders - deterministic simulation core for a wave-based arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, barriers, collisions, game state, tick)
//! - `highscores`: Leaderboard fed from the core's high-score events
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio playback, input capture and persistent storage are the
//! host's job. They talk to the core at three seams: decoded intents go in
//! through [`sim::TickInput`], a render-ready view comes out through
//! [`sim::RenderSnapshot`], and discrete [`sim::GameEvent`]s are drained
//! after each tick for the audio and persistence collaborators.

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_LIVES: u32 = 3;
    pub const PLAYER_START_SHIELD: u8 = 100;
    /// Immunity window after a hit or a shield activation, in ticks
    pub const INVULN_TICKS: u32 = 100;
    /// Shield charge spent per activation
    pub const SHIELD_ACTIVATION_COST: u8 = 20;
    /// Shield charge restored by a shield power-up (capped at 100)
    pub const SHIELD_POWERUP_HEAL: u8 = 50;

    /// Player projectile
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 15.0;
    pub const PROJECTILE_SPEED: f32 = 7.0;

    /// Enemy projectile
    pub const ENEMY_SHOT_WIDTH: f32 = 4.0;
    pub const ENEMY_SHOT_HEIGHT: f32 = 10.0;
    pub const ENEMY_SHOT_SPEED: f32 = 3.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    pub const ENEMY_BASE_SPEED: f32 = 1.0;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.2;
    /// Vertical step of the whole formation on an edge bounce
    pub const FORMATION_DESCEND_STEP: f32 = 20.0;
    /// Enemies may only fire once below this y
    pub const ENEMY_FIRE_MIN_Y: f32 = FIELD_HEIGHT * 0.3;
    /// Score for destroying one enemy
    pub const ENEMY_SCORE: u64 = 100;

    /// Formation layout
    pub const FORMATION_BASE_ROWS: u32 = 3;
    /// One extra row every this many levels
    pub const FORMATION_ROW_GROWTH_INTERVAL: u32 = 2;
    pub const FORMATION_MAX_ROWS: u32 = 6;
    pub const FORMATION_COLS: u32 = 11;
    pub const FORMATION_PADDING: f32 = 50.0;
    pub const FORMATION_ROW_SPACING: f32 = 50.0;
    pub const FORMATION_TOP_OFFSET: f32 = 50.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;

    /// Special bonus target
    pub const SPECIAL_WIDTH: f32 = 40.0;
    pub const SPECIAL_HEIGHT: f32 = 20.0;
    pub const SPECIAL_Y: f32 = 30.0;
    pub const SPECIAL_SPEED: f32 = 3.0;
    /// Spawn offset past the entry edge
    pub const SPECIAL_ENTRY_MARGIN: f32 = 50.0;
    /// Despawn once this far past either edge
    pub const SPECIAL_EXIT_MARGIN: f32 = 100.0;
    /// Bonus is this value times a draw from 1..=3
    pub const SPECIAL_BONUS_STEP: u64 = 50;

    /// Barriers
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_WIDTH: f32 = 60.0;
    pub const BARRIER_HEIGHT: f32 = 40.0;
    /// Distance of the barrier line from the bottom of the field
    pub const BARRIER_BOTTOM_OFFSET: f32 = 150.0;
    pub const BARRIER_CELL_MAX_HP: u8 = 3;
    /// Splash radius in cells around the impact cell
    pub const BARRIER_DAMAGE_RADIUS: i32 = 2;
    /// Durability removed at the impact cell before falloff
    pub const BARRIER_CENTER_DAMAGE: u8 = 2;
}
