//! Read-only view of the simulation for a render pass

use glam::Vec2;

use super::state::{
    AmbientParticle, Bullet, Obstacle, OrbitParticle, Player, PowerUp, SimulationState,
};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub field_width: f32,
    pub field_height: f32,
    pub score: u64,
    pub high_score: u64,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub power_ups: &'a [PowerUp],
    pub bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub ambient: &'a [AmbientParticle],
    pub orbit: &'a [OrbitParticle],
}

impl<'a> RenderSnapshot<'a> {
    pub fn new(state: &'a SimulationState, high_score: u64) -> Self {
        Self {
            field_width: state.tuning.field_width,
            field_height: state.tuning.field_height,
            score: state.score,
            high_score,
            player: &state.player,
            obstacles: &state.obstacles,
            power_ups: &state.power_ups,
            bullets: &state.bullets,
            enemy_bullets: &state.enemy_bullets,
            ambient: &state.ambient,
            orbit: &state.orbit,
        }
    }

    /// Orbit particles resolved to world positions around the player
    pub fn orbit_positions(&self) -> impl Iterator<Item = (Vec2, &'a OrbitParticle)> + '_ {
        let center = self.player.center();
        self.orbit.iter().map(move |p| (p.position(center), p))
    }
}
