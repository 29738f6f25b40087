//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One discrete tick per rendered frame, run to completion
//! - Seeded RNG only: a single stream with a fixed draw order
//! - Mark-for-removal flags consumed by one end-of-tick compaction
//! - No rendering or platform dependencies

pub mod barrier;
pub mod collision;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use barrier::Barrier;
pub use rect::Rect;
pub use snapshot::{RenderSnapshot, capture};
pub use state::{
    Enemy, EnemyKind, EnemyShot, Explosion, GameEvent, GameMode, GameState, Player, PowerUp,
    PowerUpKind, Projectile, SpecialTarget, WeaponType,
};
pub use tick::{TickInput, tick};
pub use wave::{check_edge_and_descend, generate_formation};
