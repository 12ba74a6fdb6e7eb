//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `SimulationState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounded, Rect};
use crate::consts::*;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One straight shot per trigger
    SingleShot,
    /// Straight shot plus two 45° shots per trigger
    SpreadShot,
}

impl PowerUpKind {
    /// How long the power-up lasts once picked up
    pub fn duration_ms(self) -> f32 {
        match self {
            PowerUpKind::SingleShot => TYPE_A_DURATION_MS,
            PowerUpKind::SpreadShot => TYPE_B_DURATION_MS,
        }
    }

    pub fn css_color(self) -> &'static str {
        match self {
            PowerUpKind::SingleShot => "yellow",
            PowerUpKind::SpreadShot => "gold",
        }
    }
}

/// Power-up held by the player
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PowerUpState {
    #[default]
    Idle,
    Active { kind: PowerUpKind, remaining_ms: f32 },
}

/// Player sprite colour (blinks while a power-up is about to run out)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerColor {
    #[default]
    Base,
    Flash,
}

impl PlayerColor {
    pub fn css_color(self) -> &'static str {
        match self {
            PlayerColor::Base => "blue",
            PlayerColor::Flash => "white",
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal pixels per tick
    pub speed: f32,
    pub power_up: PowerUpState,
    pub color: PlayerColor,
}

impl Player {
    /// Player centered at the bottom of the field
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.field_width / 2.0 - PLAYER_WIDTH / 2.0,
                tuning.field_height - PLAYER_HEIGHT,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            power_up: PowerUpState::Idle,
            color: PlayerColor::Base,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn has_power_up(&self) -> bool {
        matches!(self.power_up, PowerUpState::Active { .. })
    }

    pub fn power_up_kind(&self) -> Option<PowerUpKind> {
        match self.power_up {
            PowerUpState::Active { kind, .. } => Some(kind),
            PowerUpState::Idle => None,
        }
    }

    /// Remaining power-up time (0 when idle)
    pub fn power_up_timer(&self) -> f32 {
        match self.power_up {
            PowerUpState::Active { remaining_ms, .. } => remaining_ms,
            PowerUpState::Idle => 0.0,
        }
    }

    /// Start (or replace) the active power-up
    pub fn activate(&mut self, kind: PowerUpKind, duration_ms: f32) {
        self.power_up = PowerUpState::Active {
            kind,
            remaining_ms: duration_ms,
        };
    }

    /// Drop the power-up and restore the base colour
    pub fn deactivate(&mut self) {
        self.power_up = PowerUpState::Idle;
        self.color = PlayerColor::Base;
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Obstacle tier with its tier-specific behaviour data
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ObstacleTier {
    #[default]
    Green,
    /// Fires a 3-way spread every `fire_interval` ticks
    Red { fire_timer: u32, fire_interval: u32 },
    /// Jumps to 4x speed once, a third of the way down
    Purple { accelerated: bool },
}

impl ObstacleTier {
    pub fn red() -> Self {
        ObstacleTier::Red {
            fire_timer: 0,
            fire_interval: RED_FIRE_INTERVAL,
        }
    }

    pub fn purple() -> Self {
        ObstacleTier::Purple { accelerated: false }
    }

    /// Points for shooting down an obstacle of this tier
    pub fn kill_score(&self) -> u64 {
        match self {
            ObstacleTier::Green => SCORE_GREEN,
            ObstacleTier::Red { .. } => SCORE_RED,
            ObstacleTier::Purple { .. } => SCORE_PURPLE,
        }
    }

    pub fn css_color(&self) -> &'static str {
        match self {
            ObstacleTier::Green => "green",
            ObstacleTier::Red { .. } => "red",
            ObstacleTier::Purple { .. } => "purple",
        }
    }
}

/// A falling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick before the speed multiplier
    pub speed: f32,
    pub tier: ObstacleTier,
}

impl Bounded for Obstacle {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A falling power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    /// Square side length
    pub size: f32,
    pub speed: f32,
    pub kind: PowerUpKind,
    pub duration_ms: f32,
}

impl Bounded for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A projectile (player or enemy; the owning collection decides which)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// Decorative falling background particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientParticle {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    pub opacity: f32,
}

/// Aura colour of orbit particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuraColor {
    White,
    Gold,
}

impl AuraColor {
    pub fn css_color(self) -> &'static str {
        match self {
            AuraColor::White => "white",
            AuraColor::Gold => "gold",
        }
    }
}

/// Decorative particle circling the player while a power-up is active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitParticle {
    /// Radians
    pub angle: f32,
    pub radius: f32,
    /// Radians per tick
    pub angular_speed: f32,
    pub size: f32,
    pub color: AuraColor,
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Ticks since the last reset
    pub time_ticks: u64,
    pub score: u64,
    /// Cached `speed_multiplier(score)`, refreshed at the end of every tick
    pub speed_multiplier: f32,
    /// Ticks since the last obstacle spawn attempt
    pub obstacle_timer: u32,
    /// Ticks since the last power-up spawn attempt
    pub power_up_timer: u32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub ambient: Vec<AmbientParticle>,
    pub orbit: Vec<OrbitParticle>,
}

impl SimulationState {
    /// Create a fresh state with the given tuning and seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            player: Player::spawn(&tuning),
            ambient: Vec::with_capacity(tuning.ambient_particle_cap),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            score: 0,
            speed_multiplier: 1.0,
            obstacle_timer: 0,
            power_up_timer: 0,
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            orbit: Vec::new(),
        }
    }

    /// Reinitialize every collection, the player and the score.
    /// The RNG keeps its stream so consecutive lives differ.
    pub fn reset(&mut self) {
        self.player = Player::spawn(&self.tuning);
        self.time_ticks = 0;
        self.score = 0;
        self.speed_multiplier = 1.0;
        self.obstacle_timer = 0;
        self.power_up_timer = 0;
        self.obstacles.clear();
        self.power_ups.clear();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.ambient.clear();
        self.orbit.clear();
    }
}
