//! Post-tick consistency checks
//!
//! A violation means the simulation itself is broken. The session stops
//! ticking and hands the error to the host instead of carrying on.

use core::fmt;

use super::state::{PowerUpState, SimulationState};
use crate::speed_multiplier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    /// Active power-up with no time left, or a non-finite timer
    PowerUpTimer,
    /// Aura particles while no power-up is held
    OrbitWithoutPowerUp,
    /// Cached multiplier drifted from the score formula
    SpeedMultiplier,
    /// Ambient population above the configured cap
    AmbientCap,
    /// NaN or infinite entity position
    NonFinitePosition,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerUpTimer => write!(f, "POWER_UP_TIMER"),
            Self::OrbitWithoutPowerUp => write!(f, "ORBIT_WITHOUT_POWER_UP"),
            Self::SpeedMultiplier => write!(f, "SPEED_MULTIPLIER"),
            Self::AmbientCap => write!(f, "AMBIENT_CAP"),
            Self::NonFinitePosition => write!(f, "NON_FINITE_POSITION"),
        }
    }
}

/// Fatal simulation inconsistency
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimError {
    pub tick: u64,
    pub rule: RuleCode,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simulation invariant {} violated at tick {}", self.rule, self.tick)
    }
}

impl std::error::Error for SimError {}

/// Verify the state a tick left behind
pub fn check(state: &SimulationState) -> Result<(), SimError> {
    let fail = |rule| Err(SimError {
        tick: state.time_ticks,
        rule,
    });

    match state.player.power_up {
        PowerUpState::Active { remaining_ms, .. } if !(remaining_ms > 0.0) => {
            return fail(RuleCode::PowerUpTimer);
        }
        PowerUpState::Idle if !state.orbit.is_empty() => {
            return fail(RuleCode::OrbitWithoutPowerUp);
        }
        _ => {}
    }

    if (state.speed_multiplier - speed_multiplier(state.score)).abs() > 1e-6 {
        return fail(RuleCode::SpeedMultiplier);
    }

    if state.ambient.len() > state.tuning.ambient_particle_cap {
        return fail(RuleCode::AmbientCap);
    }

    let positions_finite = state.player.pos.is_finite()
        && state.obstacles.iter().all(|o| o.pos.is_finite())
        && state.power_ups.iter().all(|p| p.pos.is_finite())
        && state.bullets.iter().all(|b| b.pos.is_finite())
        && state.enemy_bullets.iter().all(|b| b.pos.is_finite());
    if !positions_finite {
        return fail(RuleCode::NonFinitePosition);
    }

    Ok(())
}
