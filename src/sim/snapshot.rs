//! Read-only render view of the simulation
//!
//! [`capture`] flattens the live state into plain rectangles and scalars so
//! a renderer never needs to reach into [`GameState`] or know the entity
//! types. Serialize-only: snapshots are for drawing and inspection, never
//! for restoring a run (use [`GameState::to_json`] for that).

use glam::Vec2;
use serde::Serialize;

use super::barrier::Barrier;
use super::rect::Rect;
use super::state::{EnemyKind, GameMode, GameState, PowerUpKind, WeaponType};

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub anim_phase: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarrierView {
    pub origin: Vec2,
    pub cell_size: f32,
    /// Row-major durability cells, 0 = gone
    pub cells: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub alpha: f32,
}

/// Everything a frame needs, in draw-ready form
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub mode: GameMode,
    pub level: u32,
    /// Whole seconds left on the lead-in display, 0 outside the countdown
    pub countdown_seconds: u32,
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub shield: u8,
    pub weapon: WeaponType,
    pub player: Rect,
    pub player_invulnerable: bool,
    pub projectiles: Vec<Rect>,
    pub enemy_shots: Vec<Rect>,
    pub enemies: Vec<EnemyView>,
    pub power_ups: Vec<PowerUpView>,
    pub barriers: Vec<BarrierView>,
    pub special: Option<Rect>,
    pub particles: Vec<ParticleView>,
}

pub fn capture(state: &GameState) -> RenderSnapshot {
    RenderSnapshot {
        mode: state.mode,
        level: state.level,
        countdown_seconds: state.countdown_seconds(),
        score: state.score,
        high_score: state.high_score,
        lives: state.player.lives,
        shield: state.player.shield,
        weapon: state.player.weapon,
        player: state.player.rect(),
        player_invulnerable: state.player.invulnerable(),
        projectiles: state.projectiles.iter().map(|p| p.rect()).collect(),
        enemy_shots: state.enemy_shots.iter().map(|s| s.rect()).collect(),
        enemies: state
            .enemies
            .iter()
            .map(|e| EnemyView {
                rect: e.rect(),
                kind: e.kind,
                anim_phase: e.anim_phase,
            })
            .collect(),
        power_ups: state
            .power_ups
            .iter()
            .map(|pu| PowerUpView {
                rect: pu.rect(),
                kind: pu.kind,
            })
            .collect(),
        barriers: state
            .barriers
            .iter()
            .map(|b| BarrierView {
                origin: b.origin,
                cell_size: Barrier::cell_size(),
                cells: b.grid().to_vec(),
            })
            .collect(),
        special: state.special.as_ref().map(|t| t.rect()),
        particles: state
            .explosions
            .iter()
            .flat_map(|e| &e.particles)
            .map(|p| ParticleView {
                pos: p.pos,
                alpha: p.alpha,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::barrier::{GRID_COLS, GRID_ROWS};

    #[test]
    fn snapshot_mirrors_the_state() {
        let state = GameState::new(1);
        let snapshot = capture(&state);

        assert_eq!(snapshot.mode, GameMode::Menu);
        assert_eq!(snapshot.enemies.len(), state.enemies.len());
        assert_eq!(snapshot.barriers.len(), 4);
        assert_eq!(snapshot.barriers[0].cells.len(), GRID_COLS * GRID_ROWS);
        assert_eq!(snapshot.lives, state.player.lives);
        assert!(snapshot.special.is_none());
        assert!(snapshot.particles.is_empty());
    }

    #[test]
    fn snapshot_serializes() {
        let state = GameState::new(2);
        let snapshot = capture(&state);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"score\":0"));
    }
}
