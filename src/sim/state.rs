//! Game state and entity types
//!
//! Everything that must be persisted for save/restore and determinism lives
//! here, including the PRNG stream itself. Entities never reference one
//! another: each one only advances its own state, and all interaction is
//! mediated by the collision engine reading the orchestrator-owned
//! collections in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::barrier::Barrier;
use super::rect::Rect;
use super::wave;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current mode of the outer game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the start signal
    Menu,
    /// Level lead-in; gameplay is frozen while the timer runs
    Countdown,
    /// Active gameplay
    Playing,
    /// Run ended, terminal until restart
    GameOver,
    /// Every level cleared, terminal until restart
    Win,
}

/// Weapon fitted to the ship; cycling is a closed 3-ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    Normal,
    Double,
    Triple,
}

impl WeaponType {
    pub fn cycled(self) -> Self {
        match self {
            WeaponType::Normal => WeaponType::Double,
            WeaponType::Double => WeaponType::Triple,
            WeaponType::Triple => WeaponType::Normal,
        }
    }
}

/// Discrete events emitted during a tick, drained by the host
///
/// `ShotFired`, `Explosion` and `PowerUpCollected` feed the audio
/// collaborator (which owns its own cooldown/mute logic); `HighScore` is
/// the score-reporting boundary for the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    Explosion,
    PowerUpCollected,
    HighScore(u64),
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub lives: u32,
    /// Shield charge, always in 0..=100
    pub shield: u8,
    pub weapon: WeaponType,
    /// Remaining immunity ticks; zero means vulnerable
    pub invuln_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Self::spawn_pos(),
            lives: PLAYER_START_LIVES,
            shield: PLAYER_START_SHIELD,
            weapon: WeaponType::default(),
            invuln_ticks: 0,
        }
    }

    /// Bottom-center of the field, 20 px above the edge
    pub fn spawn_pos() -> Vec2 {
        Vec2::new(
            FIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            FIELD_HEIGHT - PLAYER_HEIGHT - 20.0,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    pub fn invulnerable(&self) -> bool {
        self.invuln_ticks > 0
    }

    /// Lateral movement, clamped to the play-field
    pub fn steer(&mut self, left: bool, right: bool) {
        if left {
            self.pos.x = (self.pos.x - PLAYER_SPEED).max(0.0);
        }
        if right {
            self.pos.x = (self.pos.x + PLAYER_SPEED).min(FIELD_WIDTH - PLAYER_WIDTH);
        }
    }

    /// Count down the immunity window
    pub fn advance(&mut self) {
        self.invuln_ticks = self.invuln_ticks.saturating_sub(1);
    }

    /// Apply one hit; a no-op while the immunity window is open
    pub fn hit(&mut self) {
        if !self.invulnerable() {
            self.lives = self.lives.saturating_sub(1);
            self.invuln_ticks = INVULN_TICKS;
        }
    }

    /// Trade shield charge for an immunity window; a no-op with an empty shield
    pub fn activate_shield(&mut self) {
        if self.shield > 0 {
            self.shield = self.shield.saturating_sub(SHIELD_ACTIVATION_COST);
            self.invuln_ticks = INVULN_TICKS;
        }
    }

    pub fn heal_shield(&mut self) {
        self.shield = self.shield.saturating_add(SHIELD_POWERUP_HEAL).min(100);
    }

    pub fn cycle_weapon(&mut self) {
        self.weapon = self.weapon.cycled();
    }

    /// Projectile spawn points for the current weapon
    pub fn muzzle_points(&self) -> Vec<Vec2> {
        let Vec2 { x, y } = self.pos;
        match self.weapon {
            WeaponType::Normal => vec![Vec2::new(x + PLAYER_WIDTH / 2.0 - 2.0, y)],
            WeaponType::Double => vec![
                Vec2::new(x + 10.0, y),
                Vec2::new(x + PLAYER_WIDTH - 10.0, y),
            ],
            WeaponType::Triple => vec![
                Vec2::new(x + PLAYER_WIDTH / 2.0 - 2.0, y),
                Vec2::new(x + 5.0, y + 5.0),
                Vec2::new(x + PLAYER_WIDTH - 5.0, y + 5.0),
            ],
        }
    }
}

/// Player-fired projectile, travels up the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Set by collision resolution, consumed by the end-of-tick sweep
    pub marked_for_removal: bool,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            marked_for_removal: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }

    pub fn advance(&mut self) {
        self.pos.y -= PROJECTILE_SPEED;
    }

    pub fn off_field(&self) -> bool {
        self.pos.y < 0.0
    }
}

/// Enemy-fired projectile, travels down the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShot {
    pub pos: Vec2,
    /// Set by collision resolution, consumed by the end-of-tick sweep
    pub marked_for_removal: bool,
}

impl EnemyShot {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            marked_for_removal: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(ENEMY_SHOT_WIDTH, ENEMY_SHOT_HEIGHT))
    }

    pub fn advance(&mut self) {
        self.pos.y += ENEMY_SHOT_SPEED;
    }

    pub fn off_field(&self) -> bool {
        self.pos.y > FIELD_HEIGHT
    }
}

/// Visual/scoring variant, cycling by formation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Squid,
    Crab,
    Octopus,
}

impl EnemyKind {
    pub fn from_row(row: u32) -> Self {
        match row % 3 {
            0 => EnemyKind::Squid,
            1 => EnemyKind::Crab,
            _ => EnemyKind::Octopus,
        }
    }
}

/// One invader in the formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub kind: EnemyKind,
    /// Horizontal speed, scaled with the level at spawn
    pub speed: f32,
    /// +1 or -1; flipped for the whole formation on an edge bounce
    pub direction: f32,
    /// Cosmetic sprite phase, excluded from logic
    pub anim_phase: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind, level: u32) -> Self {
        Self {
            pos,
            kind,
            speed: ENEMY_BASE_SPEED + level as f32 * ENEMY_SPEED_PER_LEVEL,
            direction: 1.0,
            anim_phase: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
    }

    pub fn advance(&mut self) {
        self.pos.x += self.speed * self.direction;
        self.anim_phase += 0.1;
    }
}

/// Power-up drop kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Weapon,
    Life,
}

impl PowerUpKind {
    pub fn from_index(index: u32) -> Self {
        match index % 3 {
            0 => PowerUpKind::Shield,
            1 => PowerUpKind::Weapon,
            _ => PowerUpKind::Life,
        }
    }
}

/// Falling pickup left behind by a destroyed enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self { pos, kind }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(POWERUP_SIZE, POWERUP_SIZE))
    }

    pub fn advance(&mut self) {
        self.pos.y += POWERUP_FALL_SPEED;
    }

    pub fn off_field(&self) -> bool {
        self.pos.y > FIELD_HEIGHT
    }
}

/// Bonus flier crossing the top of the field, independent of the formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialTarget {
    pub pos: Vec2,
    /// +1 enters from the left, -1 from the right
    pub direction: f32,
    /// Score awarded if destroyed
    pub bonus: u64,
}

impl SpecialTarget {
    pub fn new(direction: f32, bonus: u64) -> Self {
        let x = if direction > 0.0 {
            -SPECIAL_ENTRY_MARGIN
        } else {
            FIELD_WIDTH + SPECIAL_ENTRY_MARGIN
        };
        Self {
            pos: Vec2::new(x, SPECIAL_Y),
            direction,
            bonus,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(SPECIAL_WIDTH, SPECIAL_HEIGHT))
    }

    pub fn advance(&mut self) {
        self.pos.x += SPECIAL_SPEED * self.direction;
    }

    pub fn off_field(&self) -> bool {
        self.pos.x < -SPECIAL_EXIT_MARGIN || self.pos.x > FIELD_WIDTH + SPECIAL_EXIT_MARGIN
    }
}

/// One fading spark of an explosion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alpha: f32,
}

/// Particles per burst
pub const EXPLOSION_PARTICLES: u32 = 15;
/// Alpha lost per tick
pub const EXPLOSION_FADE: f32 = 0.02;

/// Cosmetic particle burst spawned on destruction events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub particles: Vec<Particle>,
}

impl Explosion {
    /// Deterministic spread from a hash mix, so visuals never touch the
    /// gameplay RNG stream
    pub fn burst(center: Vec2, seed: u32) -> Self {
        let mut particles = Vec::with_capacity(EXPLOSION_PARTICLES as usize);
        for i in 0..EXPLOSION_PARTICLES {
            let hash = seed
                .wrapping_mul(2654435761)
                .wrapping_add(i.wrapping_mul(7919));
            let dx = (hash % 1000) as f32 / 1000.0 - 0.5;
            let dy = ((hash >> 10) % 1000) as f32 / 1000.0 - 0.5;
            particles.push(Particle {
                pos: center,
                vel: Vec2::new(dx * 8.0, dy * 8.0),
                alpha: 1.0,
            });
        }
        Self { particles }
    }

    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.alpha -= EXPLOSION_FADE;
        }
    }

    pub fn finished(&self) -> bool {
        self.particles.iter().all(|p| p.alpha <= 0.0)
    }
}

/// Complete simulation state (deterministic, serializable)
///
/// The orchestrator exclusively owns every collection here. A state
/// serialized with [`GameState::to_json`] and restored mid-level continues
/// the exact same run, including the PRNG stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The single PRNG stream behind every gameplay-stochastic decision
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub mode: GameMode,
    /// Current level, 1-based
    pub level: u32,
    /// Whole ticks left in the level lead-in
    pub countdown_ticks: u32,
    pub score: u64,
    /// Best score seen this session; crossing it emits [`GameEvent::HighScore`]
    pub high_score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemy_shots: Vec<EnemyShot>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub barriers: Vec<Barrier>,
    /// At most one live at a time
    pub special: Option<SpecialTarget>,
    /// Cosmetic bursts, not gameplay-affecting
    #[serde(skip)]
    pub explosions: Vec<Explosion>,
    /// Events of the current tick, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            mode: GameMode::Menu,
            level: 1,
            countdown_ticks: 0,
            score: 0,
            high_score: 0,
            time_ticks: 0,
            player: Player::new(),
            projectiles: Vec::new(),
            enemy_shots: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            barriers: Vec::new(),
            special: None,
            explosions: Vec::new(),
            events: Vec::new(),
        };
        state.enemies = wave::generate_formation(state.level);
        state.barriers = Barrier::field_row();
        state
    }

    /// Full reinitialization for a new run; only the session high score and
    /// the tuning survive
    pub fn restart(&mut self) {
        let high_score = self.high_score;
        *self = Self::with_tuning(self.seed, self.tuning.clone());
        self.high_score = high_score;
    }

    /// Enter the level lead-in: reposition the player, clear transients,
    /// rebuild the formation and barriers, arm the countdown
    pub fn enter_countdown(&mut self) {
        self.player.pos = Player::spawn_pos();
        self.projectiles.clear();
        self.enemy_shots.clear();
        self.power_ups.clear();
        self.special = None;
        self.enemies = wave::generate_formation(self.level);
        self.barriers = Barrier::field_row();
        self.countdown_ticks = self.tuning.countdown_ticks();
        self.mode = GameMode::Countdown;
        log::info!("level {} countdown started", self.level);
    }

    /// Seconds still shown on the countdown, rounded up
    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_ticks.div_ceil(crate::consts::TICKS_PER_SECOND)
    }

    /// Serialize the full simulation state
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restore a state previously produced by [`GameState::to_json`]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// The `reportScore` boundary: update the session record and emit the
    /// event once the running score has passed it
    pub(crate) fn report_high_score_if_beaten(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(GameEvent::HighScore(self.score));
        }
    }

    /// Spawn a cosmetic burst at `center`; hash-seeded, never touches `rng`
    pub(crate) fn spawn_explosion(&mut self, center: Vec2) {
        let seed = (self.time_ticks as u32) ^ (self.explosions.len() as u32).wrapping_mul(31337);
        self.explosions.push(Explosion::burst(center, seed));
    }
}
