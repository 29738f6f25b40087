//! Cross-entity collision resolution
//!
//! Runs once per tick in a strict order, which is what makes outcomes
//! deterministic. A projectile consumes at most one outcome per tick: its
//! removal flag is checked before every later step.
//!
//! 1. Projectiles (both sides) vs barriers
//! 2. Player projectiles vs enemies
//! 3. Player projectiles vs the special target
//! 4. Power-ups vs the player
//! 5. Enemy shots vs the player
//! 6. Enemy bodies vs the player

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameMode, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

pub fn resolve(state: &mut GameState) {
    projectiles_vs_barriers(state);
    projectiles_vs_enemies(state);
    projectiles_vs_special(state);
    power_ups_vs_player(state);
    enemy_shots_vs_player(state);
    enemies_vs_player(state);
}

fn projectiles_vs_barriers(state: &mut GameState) {
    let mut impacts: Vec<Vec2> = Vec::new();

    let GameState {
        projectiles,
        enemy_shots,
        barriers,
        rng,
        tuning,
        ..
    } = state;

    for p in projectiles.iter_mut() {
        if p.marked_for_removal {
            continue;
        }
        for barrier in barriers.iter_mut() {
            if p.rect().overlaps(&barrier.bounds()) && barrier.apply_damage(p.pos, rng, tuning) {
                p.marked_for_removal = true;
                impacts.push(p.pos);
                break;
            }
        }
    }
    for shot in enemy_shots.iter_mut() {
        if shot.marked_for_removal {
            continue;
        }
        for barrier in barriers.iter_mut() {
            if shot.rect().overlaps(&barrier.bounds()) && barrier.apply_damage(shot.pos, rng, tuning)
            {
                shot.marked_for_removal = true;
                impacts.push(shot.pos);
                break;
            }
        }
    }

    for center in impacts {
        spawn_impact_bursts(state, center);
        state.push_event(GameEvent::Explosion);
    }
}

/// Main burst at the impact point plus two smaller offset ones
fn spawn_impact_bursts(state: &mut GameState, center: Vec2) {
    state.spawn_explosion(center);
    for i in 0..2u32 {
        let hash = (state.time_ticks as u32)
            .wrapping_mul(2654435761)
            .wrapping_add(i.wrapping_mul(7919));
        let ox = (hash % 1000) as f32 / 1000.0 - 0.5;
        let oy = ((hash >> 10) % 1000) as f32 / 1000.0 - 0.5;
        state.spawn_explosion(center + Vec2::new(ox * 20.0, oy * 20.0));
    }
}

fn projectiles_vs_enemies(state: &mut GameState) {
    let mut killed = vec![false; state.enemies.len()];
    let mut bursts: Vec<Vec2> = Vec::new();
    let mut drops: Vec<PowerUp> = Vec::new();
    let mut kills: u64 = 0;

    {
        let GameState {
            projectiles,
            enemies,
            rng,
            tuning,
            ..
        } = &mut *state;

        for p in projectiles.iter_mut() {
            if p.marked_for_removal {
                continue;
            }
            for (i, enemy) in enemies.iter().enumerate() {
                if killed[i] {
                    continue;
                }
                if p.rect().overlaps(&enemy.rect()) {
                    killed[i] = true;
                    p.marked_for_removal = true;
                    kills += 1;
                    bursts.push(enemy.rect().center());
                    if rng.random_bool(tuning.power_up_chance) {
                        let kind = PowerUpKind::from_index(rng.random_range(0..3u32));
                        drops.push(PowerUp::new(
                            Vec2::new(enemy.pos.x + ENEMY_WIDTH / 2.0, enemy.pos.y),
                            kind,
                        ));
                    }
                    break;
                }
            }
        }
    }

    let mut idx = 0;
    state.enemies.retain(|_| {
        let keep = !killed[idx];
        idx += 1;
        keep
    });

    for center in bursts {
        state.spawn_explosion(center);
        state.push_event(GameEvent::Explosion);
    }
    state.power_ups.extend(drops);

    if kills > 0 {
        state.score += kills * ENEMY_SCORE;
        state.report_high_score_if_beaten();
    }
}

fn projectiles_vs_special(state: &mut GameState) {
    let Some(target) = state.special.as_ref() else {
        return;
    };
    let target_rect = target.rect();
    let bonus = target.bonus;

    let mut hit = false;
    for p in state.projectiles.iter_mut() {
        if p.marked_for_removal {
            continue;
        }
        if p.rect().overlaps(&target_rect) {
            p.marked_for_removal = true;
            hit = true;
            break;
        }
    }

    if hit {
        state.special = None;
        state.score += bonus;
        state.spawn_explosion(target_rect.center());
        state.push_event(GameEvent::Explosion);
    }
}

fn power_ups_vs_player(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut collected: Vec<PowerUpKind> = Vec::new();
    state.power_ups.retain(|pu| {
        if pu.rect().overlaps(&player_rect) {
            collected.push(pu.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        match kind {
            PowerUpKind::Shield => state.player.heal_shield(),
            PowerUpKind::Weapon => state.player.cycle_weapon(),
            PowerUpKind::Life => state.player.lives += 1,
        }
        state.push_event(GameEvent::PowerUpCollected);
    }
}

fn enemy_shots_vs_player(state: &mut GameState) {
    let GameState {
        enemy_shots,
        player,
        ..
    } = state;

    for shot in enemy_shots.iter_mut() {
        if shot.marked_for_removal {
            continue;
        }
        if !player.invulnerable() && shot.rect().overlaps(&player.rect()) {
            player.hit();
            shot.marked_for_removal = true;
        }
    }
    check_defeat(state);
}

fn enemies_vs_player(state: &mut GameState) {
    let GameState {
        enemies, player, ..
    } = state;

    for enemy in enemies.iter() {
        if !player.invulnerable() && enemy.rect().overlaps(&player.rect()) {
            player.hit();
        }
    }
    check_defeat(state);
}

fn check_defeat(state: &mut GameState) {
    if state.player.lives == 0 && state.mode == GameMode::Playing {
        state.mode = GameMode::GameOver;
        log::info!("game over at level {}, score {}", state.level, state.score);
    }
}
