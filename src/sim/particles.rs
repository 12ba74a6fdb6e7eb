//! Decorative particle systems
//!
//! Neither system affects gameplay. Ambient particles fall behind the action;
//! orbit particles circle the player while a power-up is active.

use glam::Vec2;
use rand::Rng;

use super::state::{AmbientParticle, AuraColor, OrbitParticle, PowerUpKind};
use crate::consts::{ORBIT_PARTICLE_COUNT, ORBIT_RADIUS};
use crate::polar_to_cartesian;

/// Spawn height of ambient particles (just above the field)
const AMBIENT_SPAWN_Y: f32 = -10.0;

pub fn new_ambient<R: Rng + ?Sized>(rng: &mut R, field_width: f32) -> AmbientParticle {
    AmbientParticle {
        pos: Vec2::new(rng.random::<f32>() * field_width, AMBIENT_SPAWN_Y),
        speed: 1.0 + rng.random::<f32>() * 2.0,
        size: 1.0 + rng.random::<f32>() * 2.0,
        opacity: rng.random::<f32>(),
    }
}

/// Top up the population by one, then let everything fall
pub fn update_ambient<R: Rng + ?Sized>(
    particles: &mut Vec<AmbientParticle>,
    rng: &mut R,
    field_width: f32,
    field_height: f32,
    cap: usize,
    speed_multiplier: f32,
) {
    if particles.len() < cap {
        particles.push(new_ambient(rng, field_width));
    }
    particles.retain_mut(|p| {
        p.pos.y += p.speed * speed_multiplier;
        p.pos.y <= field_height
    });
}

/// Evenly spaced ring of aura particles for a freshly picked up power-up
pub fn orbit_ring(kind: PowerUpKind) -> Vec<OrbitParticle> {
    let (color, size, angular_speed) = match kind {
        PowerUpKind::SingleShot => (AuraColor::White, 3.0, 0.005),
        PowerUpKind::SpreadShot => (AuraColor::Gold, 3.0, 0.05),
    };
    let step = std::f32::consts::TAU / ORBIT_PARTICLE_COUNT as f32;
    (0..ORBIT_PARTICLE_COUNT)
        .map(|i| OrbitParticle {
            angle: step * i as f32,
            radius: ORBIT_RADIUS,
            angular_speed,
            size,
            color,
        })
        .collect()
}

/// Advance every orbit particle by one tick. Tick-based, not delta-scaled.
pub fn advance_orbit(particles: &mut [OrbitParticle]) {
    for p in particles {
        p.angle += p.angular_speed;
    }
}

impl OrbitParticle {
    /// World position around the given center
    pub fn position(&self, center: Vec2) -> Vec2 {
        center + polar_to_cartesian(self.radius, self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_ambient_population_capped() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        for _ in 0..1_000 {
            update_ambient(&mut particles, &mut rng, 480.0, 10_000.0, 100, 1.0);
            assert!(particles.len() <= 100);
        }
        assert_eq!(particles.len(), 100);
    }

    #[test]
    fn test_ambient_attributes_in_range() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..200 {
            let p = new_ambient(&mut rng, 480.0);
            assert!((0.0..480.0).contains(&p.pos.x));
            assert_eq!(p.pos.y, -10.0);
            assert!((1.0..3.0).contains(&p.speed));
            assert!((1.0..3.0).contains(&p.size));
            assert!((0.0..1.0).contains(&p.opacity));
        }
    }

    #[test]
    fn test_ambient_removed_past_bottom() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = vec![AmbientParticle {
            pos: Vec2::new(10.0, 99.0),
            speed: 2.0,
            size: 1.0,
            opacity: 1.0,
        }];
        // Cap 0 disables spawning so only the existing particle moves
        update_ambient(&mut particles, &mut rng, 480.0, 100.0, 0, 1.0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_ambient_falls_with_multiplier() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut particles = vec![AmbientParticle {
            pos: Vec2::new(10.0, 0.0),
            speed: 2.0,
            size: 1.0,
            opacity: 1.0,
        }];
        update_ambient(&mut particles, &mut rng, 480.0, 100.0, 0, 1.5);
        assert_eq!(particles[0].pos.y, 3.0);
    }

    #[test]
    fn test_orbit_ring_evenly_spaced() {
        let ring = orbit_ring(PowerUpKind::SpreadShot);
        assert_eq!(ring.len(), 8);
        assert_eq!(ring[0].angle, 0.0);
        assert!((ring[2].angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(ring.iter().all(|p| p.color == AuraColor::Gold && p.angular_speed == 0.05));

        let ring = orbit_ring(PowerUpKind::SingleShot);
        assert!(ring.iter().all(|p| p.color == AuraColor::White && p.angular_speed == 0.005));
    }

    #[test]
    fn test_orbit_advance_and_position() {
        let mut ring = orbit_ring(PowerUpKind::SpreadShot);
        advance_orbit(&mut ring);
        assert!((ring[0].angle - 0.05).abs() < 1e-6);

        let p = OrbitParticle {
            angle: 0.0,
            radius: 40.0,
            angular_speed: 0.0,
            size: 3.0,
            color: AuraColor::White,
        };
        let pos = p.position(Vec2::new(100.0, 100.0));
        assert!((pos - Vec2::new(140.0, 100.0)).length() < 1e-4);
    }
}
