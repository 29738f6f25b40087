//! The fixed-tick orchestrator
//!
//! One call to [`tick`] advances the simulation by exactly one frame.
//! Input is sampled once at the tick boundary; inside a tick the update
//! order is fixed, which is what keeps identical seed + input scripts
//! producing identical runs.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{EnemyShot, GameEvent, GameMode, GameState, Projectile, SpecialTarget};
use super::wave;
use crate::consts::*;

/// Input sampled at a tick boundary.
///
/// `move_left` / `move_right` are level-triggered (held keys); the rest are
/// edge-triggered and should be set for exactly one tick per press.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub activate_shield: bool,
    pub cycle_weapon: bool,
    pub start: bool,
    pub restart: bool,
}

/// Advance the simulation by one frame.
///
/// Terminal states ignore everything except `restart`; ticking them is
/// otherwise a no-op. Events from the previous tick are dropped, so the
/// host must drain [`GameState::events`] between calls.
pub fn tick(state: &mut GameState, input: TickInput) {
    state.events.clear();

    match state.mode {
        GameMode::Menu => {
            if input.start {
                log::info!("run started, seed {}", state.seed);
                state.enter_countdown();
            }
            return;
        }
        GameMode::GameOver | GameMode::Win => {
            if input.restart {
                log::info!("restart requested");
                state.restart();
                state.enter_countdown();
            }
            return;
        }
        GameMode::Countdown => {
            advance_explosions(state);
            state.countdown_ticks = state.countdown_ticks.saturating_sub(1);
            if state.countdown_ticks == 0 {
                state.mode = GameMode::Playing;
                log::info!("level {} live", state.level);
            }
            return;
        }
        GameMode::Playing => {}
    }

    state.time_ticks += 1;

    apply_player_input(state, input);
    state.player.advance();

    for p in &mut state.projectiles {
        p.advance();
    }
    for shot in &mut state.enemy_shots {
        shot.advance();
    }
    for pu in &mut state.power_ups {
        pu.advance();
    }
    advance_explosions(state);

    maybe_spawn_special(state);
    if let Some(target) = state.special.as_mut() {
        target.advance();
    }
    if state.special.as_ref().is_some_and(|t| t.off_field()) {
        state.special = None;
    }

    advance_enemies(state);

    collision::resolve(state);
    wave::check_edge_and_descend(&mut state.enemies);

    sweep(state);
    check_level_complete(state);
}

fn apply_player_input(state: &mut GameState, input: TickInput) {
    state.player.steer(input.move_left, input.move_right);
    if input.cycle_weapon {
        state.player.cycle_weapon();
    }
    if input.activate_shield {
        state.player.activate_shield();
    }
    if input.fire {
        for muzzle in state.player.muzzle_points() {
            state.projectiles.push(Projectile::new(muzzle));
        }
        state.push_event(GameEvent::ShotFired);
    }
}

fn advance_explosions(state: &mut GameState) {
    for explosion in &mut state.explosions {
        explosion.advance();
    }
    state.explosions.retain(|e| !e.finished());
}

/// Roll for the bonus flier; at most one lives at a time
fn maybe_spawn_special(state: &mut GameState) {
    if state.special.is_some() {
        return;
    }
    if state.rng.random_bool(state.tuning.special_spawn_chance) {
        let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let bonus = SPECIAL_BONUS_STEP * state.rng.random_range(1..=3u64);
        log::debug!("special target: direction {direction}, bonus {bonus}");
        state.special = Some(SpecialTarget::new(direction, bonus));
    }
}

/// Move the formation and roll enemy fire, in formation order so the draw
/// sequence is reproducible
fn advance_enemies(state: &mut GameState) {
    let mut fired: Vec<EnemyShot> = Vec::new();

    let GameState {
        enemies,
        rng,
        tuning,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        enemy.advance();
        // Enemies still high in the formation never roll for fire
        if enemy.pos.y > ENEMY_FIRE_MIN_Y && rng.random_bool(tuning.enemy_fire_chance) {
            fired.push(EnemyShot::new(Vec2::new(
                enemy.pos.x + ENEMY_WIDTH / 2.0,
                enemy.pos.y + ENEMY_HEIGHT,
            )));
        }
    }
    state.enemy_shots.extend(fired);
}

/// End-of-tick compaction of everything marked or off the field
fn sweep(state: &mut GameState) {
    state
        .projectiles
        .retain(|p| !p.marked_for_removal && !p.off_field());
    state
        .enemy_shots
        .retain(|s| !s.marked_for_removal && !s.off_field());
    state.power_ups.retain(|pu| !pu.off_field());
}

fn check_level_complete(state: &mut GameState) {
    if state.mode != GameMode::Playing || !state.enemies.is_empty() {
        return;
    }
    if state.level < state.tuning.max_level {
        state.level += 1;
        state.enter_countdown();
    } else {
        state.mode = GameMode::Win;
        log::info!("final level cleared, score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::WeaponType;

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..TickInput::default()
        }
    }

    fn run_to_playing(state: &mut GameState) {
        tick(state, start());
        while state.mode == GameMode::Countdown {
            tick(state, TickInput::default());
        }
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn menu_waits_for_the_start_signal() {
        let mut state = GameState::new(1);
        for _ in 0..10 {
            tick(&mut state, TickInput::default());
        }
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, start());
        assert_eq!(state.mode, GameMode::Countdown);
        assert_eq!(state.countdown_ticks, state.tuning.countdown_ticks());
    }

    #[test]
    fn countdown_runs_down_then_goes_live() {
        let mut state = GameState::new(1);
        tick(&mut state, start());
        let armed = state.countdown_ticks;
        for _ in 0..armed - 1 {
            tick(&mut state, TickInput::default());
            assert_eq!(state.mode, GameMode::Countdown);
        }
        tick(&mut state, TickInput::default());
        assert_eq!(state.mode, GameMode::Playing);
        // Gameplay time only accumulates while live
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn firing_spawns_per_muzzle_and_emits_the_event() {
        let mut state = GameState::new(1);
        run_to_playing(&mut state);
        tick(
            &mut state,
            TickInput {
                fire: true,
                ..TickInput::default()
            },
        );
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.events.contains(&GameEvent::ShotFired));

        state.player.weapon = WeaponType::Triple;
        tick(
            &mut state,
            TickInput {
                fire: true,
                ..TickInput::default()
            },
        );
        assert_eq!(state.projectiles.len(), 4);
    }

    #[test]
    fn events_are_cleared_each_tick() {
        let mut state = GameState::new(1);
        run_to_playing(&mut state);
        tick(
            &mut state,
            TickInput {
                fire: true,
                ..TickInput::default()
            },
        );
        assert!(!state.events.is_empty());
        tick(&mut state, TickInput::default());
        assert!(state.events.is_empty());
    }

    #[test]
    fn clearing_the_formation_starts_exactly_one_countdown() {
        let mut state = GameState::new(1);
        run_to_playing(&mut state);
        state.enemies.clear();
        tick(&mut state, TickInput::default());

        assert_eq!(state.level, 2);
        assert_eq!(state.mode, GameMode::Countdown);
        assert_eq!(state.countdown_ticks, state.tuning.countdown_ticks());
        assert!(!state.enemies.is_empty());

        tick(&mut state, TickInput::default());
        // Still level 2; the transition fired once
        assert_eq!(state.level, 2);
        assert_eq!(state.countdown_ticks, state.tuning.countdown_ticks() - 1);
    }

    #[test]
    fn clearing_the_final_level_wins() {
        let mut state = GameState::new(1);
        run_to_playing(&mut state);
        state.level = state.tuning.max_level;
        state.enemies.clear();
        tick(&mut state, TickInput::default());
        assert_eq!(state.mode, GameMode::Win);
    }

    #[test]
    fn terminal_states_only_listen_for_restart() {
        let mut state = GameState::new(1);
        run_to_playing(&mut state);
        state.mode = GameMode::GameOver;
        let ticks_before = state.time_ticks;

        tick(
            &mut state,
            TickInput {
                fire: true,
                move_left: true,
                ..TickInput::default()
            },
        );
        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.time_ticks, ticks_before);

        tick(
            &mut state,
            TickInput {
                restart: true,
                ..TickInput::default()
            },
        );
        assert_eq!(state.mode, GameMode::Countdown);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn special_target_spawn_is_tunable() {
        let tuning = crate::tuning::Tuning {
            special_spawn_chance: 1.0,
            ..crate::tuning::Tuning::default()
        };
        let mut state = GameState::with_tuning(5, tuning);
        run_to_playing(&mut state);
        tick(&mut state, TickInput::default());
        let target = state.special.as_ref().unwrap();
        assert!(target.bonus % SPECIAL_BONUS_STEP == 0);
        assert!((1..=3).contains(&(target.bonus / SPECIAL_BONUS_STEP)));

        // Already live: no second spawn
        let bonus = target.bonus;
        tick(&mut state, TickInput::default());
        assert_eq!(state.special.as_ref().unwrap().bonus, bonus);
    }

    #[test]
    fn sweep_drops_marked_and_off_field_entities() {
        let mut state = GameState::new(1);
        run_to_playing(&mut state);
        state
            .projectiles
            .push(Projectile::new(Vec2::new(400.0, 2.0)));
        state
            .enemy_shots
            .push(EnemyShot::new(Vec2::new(400.0, FIELD_HEIGHT - 1.0)));
        tick(&mut state, TickInput::default());
        assert!(state.projectiles.is_empty());
        assert!(state.enemy_shots.is_empty());
    }

    #[test]
    fn held_steering_moves_every_tick() {
        let mut state = GameState::new(1);
        run_to_playing(&mut state);
        let x = state.player.pos.x;
        for _ in 0..3 {
            tick(
                &mut state,
                TickInput {
                    move_left: true,
                    ..TickInput::default()
                },
            );
        }
        assert_eq!(state.player.pos.x, x - 3.0 * PLAYER_SPEED);
    }
}
