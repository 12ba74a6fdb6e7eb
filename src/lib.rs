//! Dodge Shooter - a falling-obstacle arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `game`: Session state machine driving the simulation from host events
//! - `platform`: Browser/native input abstraction
//! - `persistence`: Scalar high-score storage
//! - `tuning`: Data-driven game balance
//! - `renderer`: Canvas 2D render pass (wasm only)

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{FrameOutcome, GameHooks, GamePhase, Session};
pub use highscores::HighScore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Player sprite size and horizontal speed (pixels per tick)
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;
    pub const OBSTACLE_BASE_SPEED: f32 = 2.0;
    /// Red obstacles fire every this many ticks
    pub const RED_FIRE_INTERVAL: u32 = 100;
    /// One-shot speed factor for purple obstacles past a third of the field
    pub const PURPLE_BOOST: f32 = 4.0;

    /// Power-up defaults
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_SPEED: f32 = 2.0;
    pub const TYPE_A_DURATION_MS: f32 = 10_000.0;
    pub const TYPE_B_DURATION_MS: f32 = 8_000.0;
    /// Blink starts when this much power-up time is left
    pub const BLINK_THRESHOLD_MS: f32 = 3_000.0;
    pub const BLINK_PERIOD_MS: f32 = 200.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;

    /// Score awards
    pub const SCORE_DODGE: u64 = 10;
    pub const SCORE_GREEN: u64 = 20;
    pub const SCORE_RED: u64 = 50;
    pub const SCORE_PURPLE: u64 = 100;

    /// Difficulty thresholds
    pub const PURPLE_UNLOCK_SCORE: u64 = 1000;
    pub const RED_UNLOCK_SCORE: u64 = 500;
    pub const PURPLE_CHANCE: f32 = 0.15;
    pub const RED_CHANCE: f32 = 0.2;
    pub const TYPE_B_CHANCE: f32 = 0.2;
    /// Obstacle spawn interval never drops below this many ticks
    pub const MIN_OBSTACLE_INTERVAL: u32 = 20;

    /// Orbit aura
    pub const ORBIT_PARTICLE_COUNT: usize = 8;
    pub const ORBIT_RADIUS: f32 = 40.0;
}

/// Convert polar (r, theta) to a cartesian offset
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> glam::Vec2 {
    glam::Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Speed multiplier applied to every falling entity: `1 + floor(score/100) * 0.1`
#[inline]
pub fn speed_multiplier(score: u64) -> f32 {
    1.0 + (score / 100) as f32 * 0.1
}

/// Ticks between obstacle spawns, shrinking by 10 every 500 points
#[inline]
pub fn obstacle_spawn_interval(score: u64, base_frequency: u32) -> u32 {
    let reduction = (score / 500).saturating_mul(10);
    let reduced = (base_frequency as u64).saturating_sub(reduction) as u32;
    reduced.max(consts::MIN_OBSTACLE_INTERVAL)
}
