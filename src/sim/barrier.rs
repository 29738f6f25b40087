//! Destructible barrier with a sub-cell durability grid
//!
//! Each barrier is a fixed-origin rectangle subdivided into a 10x7 grid of
//! cells holding 0..=3 hit points. Impacts radiate damage outward from the
//! impact cell with radial falloff plus a probabilistic extra point of
//! splash. A cell at 0 is permanently passable.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

pub const GRID_COLS: usize = 10;
pub const GRID_ROWS: usize = 7;

/// Intact-cell template; spaces carve the doorway at the bottom
const TEMPLATE: [&str; GRID_ROWS] = [
    "XXXXXXXXXX",
    "XXXXXXXXXX",
    "XXXXXXXXXX",
    "XXXXXXXXXX",
    "XXXXXXXXXX",
    "XXX    XXX",
    "XX      XX",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    /// Top-left corner, fixed for the barrier's lifetime
    pub origin: Vec2,
    /// Row-major durability cells; 0 = destroyed/passable
    grid: Vec<u8>,
}

impl Barrier {
    pub fn new(origin: Vec2) -> Self {
        let mut grid = Vec::with_capacity(GRID_COLS * GRID_ROWS);
        for row in TEMPLATE {
            for cell in row.bytes() {
                grid.push(if cell == b'X' { BARRIER_CELL_MAX_HP } else { 0 });
            }
        }
        Self { origin, grid }
    }

    /// The evenly spaced defensive line of a fresh level
    pub fn field_row() -> Vec<Barrier> {
        let spacing =
            (FIELD_WIDTH - BARRIER_COUNT as f32 * BARRIER_WIDTH) / (BARRIER_COUNT as f32 + 1.0);
        let y = FIELD_HEIGHT - BARRIER_BOTTOM_OFFSET;
        log::debug!("barrier line at y {y}, spacing {spacing}");
        (0..BARRIER_COUNT)
            .map(|i| Barrier::new(Vec2::new(spacing + i as f32 * (BARRIER_WIDTH + spacing), y)))
            .collect()
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos(self.origin, Vec2::new(BARRIER_WIDTH, BARRIER_HEIGHT))
    }

    pub fn cell_size() -> f32 {
        BARRIER_WIDTH / GRID_COLS as f32
    }

    pub fn cell(&self, col: usize, row: usize) -> u8 {
        self.grid[row * GRID_COLS + col]
    }

    /// Row-major view of the durability cells
    pub fn grid(&self) -> &[u8] {
        &self.grid
    }

    /// Apply radial splash damage around `impact` (field coordinates).
    ///
    /// Returns whether any cell actually lost durability; the caller uses
    /// that to decide whether the projectile is consumed. An impact point
    /// resolving outside the grid damages nothing.
    pub fn apply_damage(&mut self, impact: Vec2, rng: &mut Pcg32, tuning: &Tuning) -> bool {
        let cell = Self::cell_size();
        let grid_x = ((impact.x - self.origin.x) / cell).floor() as i32;
        let grid_y = ((impact.y - self.origin.y) / cell).floor() as i32;

        let radius = BARRIER_DAMAGE_RADIUS;
        let mut damaged = false;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let ny = grid_y + dy;
                let nx = grid_x + dx;
                if ny < 0 || ny >= GRID_ROWS as i32 || nx < 0 || nx >= GRID_COLS as i32 {
                    continue;
                }
                let idx = ny as usize * GRID_COLS + nx as usize;
                if self.grid[idx] == 0 {
                    continue;
                }
                let distance = ((dx * dx + dy * dy) as f32).sqrt();
                if distance > radius as f32 {
                    continue;
                }
                // Falloff: full damage at the impact cell, less toward the rim
                let falloff = 1.0 - distance / (radius as f32 + 1.0);
                let mut damage = (BARRIER_CENTER_DAMAGE as f32 * falloff).ceil() as u8;
                // Splash luck, rolled independently per cell
                if rng.random_bool(tuning.splash_luck_chance) {
                    damage += 1;
                }
                self.grid[idx] = self.grid[idx].saturating_sub(damage);
                damaged = true;
            }
        }
        damaged
    }
}
