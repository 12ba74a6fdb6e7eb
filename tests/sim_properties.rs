use dodge_shooter::persistence::{MemoryStore, ScoreStore};
use dodge_shooter::sim::spawn::{roll_tier, spawn_obstacle};
use dodge_shooter::sim::{
    Bullet, Obstacle, ObstacleTier, PowerUpKind, SimulationState, TickInput, invariants, tick,
};
use dodge_shooter::{HighScore, Tuning, obstacle_spawn_interval, speed_multiplier};
use glam::Vec2;
use proptest::prelude::*;
use rand::RngCore;

/// RNG that always yields the same word. `Fixed(0)` makes every chance
/// roll succeed; `Fixed(u32::MAX)` makes every roll fail.
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

fn quiet_tuning() -> Tuning {
    Tuning {
        obstacle_base_frequency: 1_000_000,
        power_up_interval: 1_000_000,
        ambient_particle_cap: 0,
        ..Tuning::for_field(400.0, 600.0)
    }
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(left, right, fire)| TickInput { left, right, fire })
}

fn tier_strategy() -> impl Strategy<Value = ObstacleTier> {
    prop_oneof![
        Just(ObstacleTier::Green),
        Just(ObstacleTier::red()),
        Just(ObstacleTier::purple()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn power_up_fields_stay_consistent(
        seed in any::<u64>(),
        steps in prop::collection::vec((input_strategy(), 1.0f32..200.0), 50..400),
    ) {
        // Frequent power-ups so pickups and expiries actually happen
        let tuning = Tuning {
            power_up_interval: 5,
            obstacle_base_frequency: 30,
            ..Tuning::for_field(120.0, 200.0)
        };
        let mut state = SimulationState::new(tuning, seed);

        for (input, dt) in &steps {
            tick(&mut state, input, *dt);
            if !state.player.has_power_up() {
                prop_assert_eq!(state.player.power_up_kind(), None);
                prop_assert!(state.player.power_up_timer() <= 0.0);
                prop_assert!(state.orbit.is_empty());
            }
            prop_assert_eq!(state.speed_multiplier, speed_multiplier(state.score));
            prop_assert!(invariants::check(&state).is_ok());
        }
    }

    #[test]
    fn score_never_decreases_within_a_life(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 100..500),
    ) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        let mut last = 0;
        for input in &inputs {
            tick(&mut state, input, 16.0);
            prop_assert!(state.score >= last);
            last = state.score;
        }
    }

    #[test]
    fn multiplier_matches_formula(score in 0u64..1_000_000) {
        let expected = 1.0 + (score / 100) as f64 * 0.1;
        prop_assert!((speed_multiplier(score) as f64 - expected).abs() < 1e-3);
    }

    #[test]
    fn spawn_interval_non_increasing_and_floored(a in 0u64..100_000, b in 0u64..100_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let at_lo = obstacle_spawn_interval(lo, 100);
        let at_hi = obstacle_spawn_interval(hi, 100);
        prop_assert!(at_hi <= at_lo);
        prop_assert!(at_hi >= 20);
    }

    #[test]
    fn bullet_kills_exactly_one(
        tier in tier_strategy(),
        x in 0.0f32..300.0,
        stacked in 1usize..4,
    ) {
        let mut state = SimulationState::new(quiet_tuning(), 1);
        for _ in 0..stacked {
            state.obstacles.push(Obstacle {
                pos: Vec2::new(x, 100.0),
                size: Vec2::new(30.0, 50.0),
                speed: 2.0,
                tier,
            });
        }
        // Obstacles fall to y=102..152; the bullet rises to 143..153
        state.bullets.push(Bullet::new(Vec2::new(x + 10.0, 150.0), Vec2::new(0.0, -7.0)));

        tick(&mut state, &TickInput::default(), 16.0);

        prop_assert_eq!(state.obstacles.len(), stacked - 1);
        prop_assert!(state.bullets.is_empty());
        prop_assert_eq!(state.score, tier.kill_score());
    }

    #[test]
    fn high_score_is_running_max(scores in prop::collection::vec(0u64..10_000, 1..50)) {
        let mut store = MemoryStore::new();
        let mut high = HighScore::load(&store);
        for &s in &scores {
            high.submit(s, &mut store);
        }
        let max = scores.iter().copied().max().unwrap_or(0);
        prop_assert_eq!(high.best(), max);
        let stored = store.load(HighScore::STORAGE_KEY);
        prop_assert_eq!(stored, if max > 0 { Some(max) } else { None });
    }
}

#[test]
fn green_obstacles_at_score_zero_award_ten() {
    let mut rng = Fixed(0);
    for _ in 0..10 {
        assert_eq!(roll_tier(&mut rng, 0), ObstacleTier::Green);
    }

    let mut state = SimulationState::new(quiet_tuning(), 9);
    let mut obstacle = spawn_obstacle(&mut rng, 400.0, 0, &[]).expect("no power-ups to overlap");
    obstacle.pos.y = 599.0;
    state.obstacles.push(obstacle);

    tick(&mut state, &TickInput::default(), 16.0);
    assert_eq!(state.score, 10);
}

#[test]
fn purple_at_1200_accelerates_once() {
    let mut rng = Fixed(0);
    let obstacle = spawn_obstacle(&mut rng, 400.0, 1200, &[]).expect("no power-ups to overlap");
    assert_eq!(obstacle.tier, ObstacleTier::Purple { accelerated: false });
    let base = obstacle.speed;

    let mut state = SimulationState::new(quiet_tuning(), 9);
    state.obstacles.push(obstacle);

    let third = state.tuning.field_height / 3.0;
    let mut boosted_at = None;
    for t in 0..200 {
        tick(&mut state, &TickInput::default(), 16.0);
        let Some(obs) = state.obstacles.first() else {
            break;
        };
        if obs.speed != base && boosted_at.is_none() {
            boosted_at = Some(t);
            assert_eq!(obs.speed, base * 4.0);
        }
        if boosted_at.is_some() {
            assert_eq!(obs.speed, base * 4.0);
            assert!(obs.pos.y > third);
        }
    }
    assert!(boosted_at.is_some());
}

#[test]
fn spread_power_up_expires_after_duration() {
    let mut state = SimulationState::new(quiet_tuning(), 4);
    state.power_ups.push(dodge_shooter::sim::PowerUp {
        pos: state.player.pos,
        size: 20.0,
        speed: 0.0,
        kind: PowerUpKind::SpreadShot,
        duration_ms: PowerUpKind::SpreadShot.duration_ms(),
    });

    // Pickup tick consumes its own delta too
    tick(&mut state, &TickInput::default(), 0.0);
    assert_eq!(state.player.power_up_kind(), Some(PowerUpKind::SpreadShot));
    assert_eq!(state.orbit.len(), 8);

    for _ in 0..79 {
        tick(&mut state, &TickInput::default(), 100.0);
        assert!(state.player.has_power_up());
    }
    tick(&mut state, &TickInput::default(), 100.0);
    assert!(!state.player.has_power_up());
    assert!(state.orbit.is_empty());
}

#[test]
fn reset_never_lowers_persisted_high_score() {
    let mut store = MemoryStore::new();
    let mut high = HighScore::load(&store);
    high.submit(730, &mut store);

    let mut state = SimulationState::new(Tuning::default(), 1);
    state.score = 730;
    state.reset();
    high.submit(state.score, &mut store);

    assert_eq!(store.load(HighScore::STORAGE_KEY), Some(730));
    assert_eq!(HighScore::load(&store).best(), 730);
}
