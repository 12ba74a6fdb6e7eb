//! Data-driven game balance
//!
//! Field dimensions and spawn cadences. Everything else is fixed in `consts`.

use serde::{Deserialize, Serialize};

/// Tunable parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Play field width in pixels
    pub field_width: f32,
    /// Play field height in pixels
    pub field_height: f32,
    /// Obstacle spawn interval (ticks) at score 0
    pub obstacle_base_frequency: u32,
    /// Ticks between power-up spawn attempts
    pub power_up_interval: u32,
    /// Maximum ambient background particles
    pub ambient_particle_cap: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 480.0,
            field_height: 640.0,
            obstacle_base_frequency: 100,
            power_up_interval: 500,
            ambient_particle_cap: 100,
        }
    }
}

impl Tuning {
    /// Tuning for a canvas of the given size, defaults otherwise
    pub fn for_field(width: f32, height: f32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Parse tuning from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::info!(
            "Loaded tuning: {}x{} field, obstacle every {} ticks",
            tuning.field_width,
            tuning.field_height,
            tuning.obstacle_base_frequency
        );
        Ok(tuning)
    }
}
