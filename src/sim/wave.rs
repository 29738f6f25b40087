//! Formation generation and collective movement
//!
//! The enemy grid moves as one body: every enemy shares the same travel
//! direction, and when any enemy's leading edge reaches a field boundary
//! the whole formation reverses and steps down on that same tick.

use glam::Vec2;

use super::state::{Enemy, EnemyKind};
use crate::consts::*;

/// Rows for a level: one extra row per growth interval, capped
pub fn rows_for_level(level: u32) -> u32 {
    (FORMATION_BASE_ROWS + (level - 1) / FORMATION_ROW_GROWTH_INTERVAL).min(FORMATION_MAX_ROWS)
}

/// Build the horizontally centered enemy grid for a level
pub fn generate_formation(level: u32) -> Vec<Enemy> {
    let rows = rows_for_level(level);
    let start_x = (FIELD_WIDTH - FORMATION_COLS as f32 * FORMATION_PADDING) / 2.0;
    let mut enemies = Vec::with_capacity((rows * FORMATION_COLS) as usize);
    for row in 0..rows {
        for col in 0..FORMATION_COLS {
            let pos = Vec2::new(
                start_x + col as f32 * FORMATION_PADDING,
                row as f32 * FORMATION_ROW_SPACING + FORMATION_TOP_OFFSET,
            );
            enemies.push(Enemy::new(pos, EnemyKind::from_row(row), level));
        }
    }
    log::debug!("formation: level {level}, {rows} rows, {} enemies", enemies.len());
    enemies
}

/// Reverse and step the formation down when any enemy's leading edge reaches
/// a boundary. Atomic: every enemy flips and descends on the same tick.
pub fn check_edge_and_descend(enemies: &mut [Enemy]) {
    let hit_edge = enemies.iter().any(|e| {
        (e.direction > 0.0 && e.pos.x + ENEMY_WIDTH >= FIELD_WIDTH)
            || (e.direction < 0.0 && e.pos.x <= 0.0)
    });
    if hit_edge {
        for e in enemies {
            e.direction = -e.direction;
            e.pos.y += FORMATION_DESCEND_STEP;
        }
    }
}
