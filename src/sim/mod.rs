//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Survivor collection instead of index splicing while iterating
//! - No rendering, storage or DOM dependencies

pub mod collision;
pub mod invariants;
pub mod particles;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Bounded, Rect};
pub use invariants::{RuleCode, SimError};
pub use snapshot::RenderSnapshot;
pub use state::{
    AmbientParticle, AuraColor, Bullet, Obstacle, ObstacleTier, OrbitParticle, Player,
    PlayerColor, PowerUp, PowerUpKind, PowerUpState, SimulationState,
};
pub use tick::{GameEvent, HitCause, TickInput, tick};
