//! Entity factories
//!
//! Randomized constructors take any `Rng` so tests can drive them with a
//! fixed source. Spawns that would overlap the other pickup/obstacle kind are
//! rejected outright; the caller does not retry until the next cadence.

use glam::Vec2;
use rand::Rng;

use super::collision::{Bounded, overlaps_any};
use super::state::{Bullet, Obstacle, ObstacleTier, Player, PowerUp, PowerUpKind};
use crate::consts::*;

/// Roll the tier of a new obstacle. Purple is rolled before red, so when both
/// are unlocked a successful purple roll always wins.
pub fn roll_tier<R: Rng + ?Sized>(rng: &mut R, score: u64) -> ObstacleTier {
    if score > PURPLE_UNLOCK_SCORE && rng.random::<f32>() < PURPLE_CHANCE {
        ObstacleTier::purple()
    } else if score > RED_UNLOCK_SCORE && rng.random::<f32>() < RED_CHANCE {
        ObstacleTier::red()
    } else {
        ObstacleTier::Green
    }
}

/// Build an obstacle just above the field at a random column
pub fn new_obstacle<R: Rng + ?Sized>(rng: &mut R, field_width: f32, score: u64) -> Obstacle {
    let x = rng.random::<f32>() * (field_width - OBSTACLE_WIDTH).max(0.0);
    Obstacle {
        pos: Vec2::new(x, -OBSTACLE_HEIGHT),
        size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        speed: OBSTACLE_BASE_SPEED,
        tier: roll_tier(rng, score),
    }
}

/// New obstacle, or `None` if it would overlap a falling power-up
pub fn spawn_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    field_width: f32,
    score: u64,
    power_ups: &[PowerUp],
) -> Option<Obstacle> {
    let obstacle = new_obstacle(rng, field_width, score);
    if overlaps_any(&obstacle.bounds(), power_ups) {
        log::trace!("Obstacle spawn at x={:.1} rejected (power-up overlap)", obstacle.pos.x);
        return None;
    }
    Some(obstacle)
}

/// Build a power-up just above the field. Spread shot is the rarer kind.
pub fn new_power_up<R: Rng + ?Sized>(rng: &mut R, field_width: f32) -> PowerUp {
    let kind = if rng.random::<f32>() < TYPE_B_CHANCE {
        PowerUpKind::SpreadShot
    } else {
        PowerUpKind::SingleShot
    };
    let x = rng.random::<f32>() * (field_width - POWER_UP_SIZE).max(0.0);
    PowerUp {
        pos: Vec2::new(x, -POWER_UP_SIZE),
        size: POWER_UP_SIZE,
        speed: POWER_UP_SPEED,
        kind,
        duration_ms: kind.duration_ms(),
    }
}

/// New power-up, or `None` if it would overlap a falling obstacle
pub fn spawn_power_up<R: Rng + ?Sized>(
    rng: &mut R,
    field_width: f32,
    obstacles: &[Obstacle],
) -> Option<PowerUp> {
    let power_up = new_power_up(rng, field_width);
    if overlaps_any(&power_up.bounds(), obstacles) {
        log::trace!("Power-up spawn at x={:.1} rejected (obstacle overlap)", power_up.pos.x);
        return None;
    }
    Some(power_up)
}

/// Bullets fired by the player for one trigger. Empty without a power-up.
pub fn player_volley(player: &Player) -> Vec<Bullet> {
    let origin = Vec2::new(player.pos.x + player.size.x / 2.0 - BULLET_WIDTH / 2.0, player.pos.y);
    match player.power_up_kind() {
        None => Vec::new(),
        Some(PowerUpKind::SingleShot) => vec![Bullet::new(origin, Vec2::new(0.0, -7.0))],
        Some(PowerUpKind::SpreadShot) => vec![
            Bullet::new(origin, Vec2::new(0.0, -7.0)),
            Bullet::new(origin, Vec2::new(-5.0, -5.0)),
            Bullet::new(origin, Vec2::new(5.0, -5.0)),
        ],
    }
}

/// Downward 3-way spread from the bottom center of a red obstacle
pub fn enemy_volley(obstacle: &Obstacle) -> [Bullet; 3] {
    let origin = Vec2::new(
        obstacle.pos.x + obstacle.size.x / 2.0 - BULLET_WIDTH / 2.0,
        obstacle.pos.y + obstacle.size.y,
    );
    [
        Bullet::new(origin, Vec2::new(0.0, 5.0)),
        Bullet::new(origin, Vec2::new(-3.5, 3.5)),
        Bullet::new(origin, Vec2::new(3.5, 3.5)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::RngCore;

    /// RNG that always yields the same word. `Fixed(0)` makes every
    /// `random::<f32>()` return 0.0, so every chance roll succeeds;
    /// `Fixed(u32::MAX)` makes every roll fail.
    struct Fixed(u32);

    impl RngCore for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            ((self.0 as u64) << 32) | self.0 as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.0.to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    #[test]
    fn test_low_score_always_green() {
        let mut rng = Fixed(0);
        for score in [0, 250, 500] {
            assert_eq!(roll_tier(&mut rng, score), ObstacleTier::Green);
        }
    }

    #[test]
    fn test_purple_checked_before_red() {
        let mut rng = Fixed(0);
        assert_eq!(roll_tier(&mut rng, 1200), ObstacleTier::purple());
        assert_eq!(roll_tier(&mut rng, 501), ObstacleTier::red());
        assert_eq!(roll_tier(&mut rng, 1000), ObstacleTier::red());
    }

    #[test]
    fn test_failed_rolls_fall_back_to_green() {
        let mut rng = Fixed(u32::MAX);
        assert_eq!(roll_tier(&mut rng, 5_000), ObstacleTier::Green);
    }

    #[test]
    fn test_obstacle_spawns_above_field() {
        let mut rng = Fixed(0);
        let obstacle = new_obstacle(&mut rng, 480.0, 0);
        assert_eq!(obstacle.pos, Vec2::new(0.0, -50.0));
        assert_eq!(obstacle.speed, 2.0);
        assert_eq!(obstacle.size, Vec2::new(30.0, 50.0));
    }

    #[test]
    fn test_obstacle_rejected_on_power_up_overlap() {
        let mut rng = Fixed(0);
        let power_up = PowerUp {
            pos: Vec2::new(5.0, -30.0),
            size: 20.0,
            speed: 2.0,
            kind: PowerUpKind::SingleShot,
            duration_ms: 10_000.0,
        };
        assert!(spawn_obstacle(&mut rng, 480.0, 0, &[power_up.clone()]).is_none());

        let far = PowerUp {
            pos: Vec2::new(300.0, -30.0),
            ..power_up
        };
        assert!(spawn_obstacle(&mut rng, 480.0, 0, &[far]).is_some());
    }

    #[test]
    fn test_power_up_kind_roll() {
        let spread = new_power_up(&mut Fixed(0), 480.0);
        assert_eq!(spread.kind, PowerUpKind::SpreadShot);
        assert_eq!(spread.duration_ms, 8_000.0);
        assert_eq!(spread.pos.y, -20.0);

        let single = new_power_up(&mut Fixed(u32::MAX), 480.0);
        assert_eq!(single.kind, PowerUpKind::SingleShot);
        assert_eq!(single.duration_ms, 10_000.0);
    }

    #[test]
    fn test_power_up_rejected_on_obstacle_overlap() {
        let mut rng = Fixed(0);
        let obstacle = new_obstacle(&mut Fixed(0), 480.0, 0);
        assert!(spawn_power_up(&mut rng, 480.0, &[obstacle]).is_none());
        assert!(spawn_power_up(&mut rng, 480.0, &[]).is_some());
    }

    #[test]
    fn test_no_volley_without_power_up() {
        let player = Player::spawn(&Tuning::default());
        assert!(player_volley(&player).is_empty());
    }

    #[test]
    fn test_spread_volley_velocities() {
        let mut player = Player::spawn(&Tuning::default());
        player.activate(PowerUpKind::SpreadShot, 8_000.0);
        let volley = player_volley(&player);
        let vels: Vec<Vec2> = volley.iter().map(|b| b.vel).collect();
        assert_eq!(
            vels,
            vec![Vec2::new(0.0, -7.0), Vec2::new(-5.0, -5.0), Vec2::new(5.0, -5.0)]
        );
        let expected_x = player.center().x - BULLET_WIDTH / 2.0;
        assert!(volley.iter().all(|b| b.pos == Vec2::new(expected_x, player.pos.y)));
    }

    #[test]
    fn test_single_volley() {
        let mut player = Player::spawn(&Tuning::default());
        player.activate(PowerUpKind::SingleShot, 10_000.0);
        let volley = player_volley(&player);
        assert_eq!(volley.len(), 1);
        assert_eq!(volley[0].vel, Vec2::new(0.0, -7.0));
    }

    #[test]
    fn test_enemy_volley_from_bottom_center() {
        let obstacle = Obstacle {
            pos: Vec2::new(100.0, 200.0),
            size: Vec2::new(30.0, 50.0),
            speed: 2.0,
            tier: ObstacleTier::red(),
        };
        let volley = enemy_volley(&obstacle);
        assert!(volley.iter().all(|b| b.pos == Vec2::new(112.5, 250.0)));
        assert_eq!(volley[0].vel, Vec2::new(0.0, 5.0));
        assert_eq!(volley[1].vel, Vec2::new(-3.5, 3.5));
        assert_eq!(volley[2].vel, Vec2::new(3.5, 3.5));
    }
}
