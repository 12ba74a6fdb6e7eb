//! Simulation tick
//!
//! Advances every entity collection exactly once per call, in a fixed order:
//! player, fire, orbit aura, obstacles, obstacle spawns, power-ups, power-up
//! spawns, power-up countdown, player bullets, enemy bullets, speed
//! multiplier, ambient particles.
//!
//! Entity motion is per tick (pixels per frame). Only the power-up countdown
//! consumes the elapsed-time delta.

use super::collision::Bounded;
use super::particles;
use super::spawn;
use super::state::{ObstacleTier, PlayerColor, PowerUpKind, PowerUpState, SimulationState};
use crate::consts::*;
use crate::{obstacle_spawn_interval, speed_multiplier};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Fire trigger (one-shot)
    pub fire: bool,
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitCause {
    Obstacle,
    EnemyBullet,
}

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Score increased by `points`; `total` is the score right after the award
    ScoreAwarded { points: u64, total: u64 },
    PowerUpCollected(PowerUpKind),
    PowerUpExpired,
    /// Player fired `count` bullets
    Fired { count: usize },
    PlayerHit(HitCause),
}

/// Advance the simulation by one tick. `dt_ms` is the real time since the
/// previous tick and only drives the power-up countdown.
pub fn tick(state: &mut SimulationState, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    move_player(state, input);
    if input.fire {
        fire(state, &mut events);
    }

    // Orbit aura only exists while powered
    if state.player.has_power_up() {
        particles::advance_orbit(&mut state.orbit);
    } else {
        state.orbit.clear();
    }

    update_obstacles(state, &mut events);
    spawn_obstacles(state);
    update_power_ups(state, &mut events);
    spawn_power_ups(state);
    countdown_power_up(state, dt_ms, &mut events);
    update_bullets(state, &mut events);
    update_enemy_bullets(state, &mut events);

    state.speed_multiplier = speed_multiplier(state.score);

    particles::update_ambient(
        &mut state.ambient,
        &mut state.rng,
        state.tuning.field_width,
        state.tuning.field_height,
        state.tuning.ambient_particle_cap,
        state.speed_multiplier,
    );

    events
}

fn move_player(state: &mut SimulationState, input: &TickInput) {
    let player = &mut state.player;
    if input.left && player.pos.x > 0.0 {
        player.pos.x -= player.speed;
    }
    if input.right && player.pos.x + player.size.x < state.tuning.field_width {
        player.pos.x += player.speed;
    }
}

fn fire(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let volley = spawn::player_volley(&state.player);
    if volley.is_empty() {
        return;
    }
    events.push(GameEvent::Fired { count: volley.len() });
    state.bullets.extend(volley);
}

fn update_obstacles(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let field_height = state.tuning.field_height;
    let multiplier = state.speed_multiplier;
    let player = state.player.bounds();
    let score = &mut state.score;
    let enemy_bullets = &mut state.enemy_bullets;

    state.obstacles.retain_mut(|obs| {
        if let ObstacleTier::Purple { accelerated } = &mut obs.tier {
            if !*accelerated && obs.pos.y > field_height / 3.0 {
                obs.speed *= PURPLE_BOOST;
                *accelerated = true;
            }
        }

        obs.pos.y += obs.speed * multiplier;

        if obs.pos.y > field_height {
            *score += SCORE_DODGE;
            events.push(GameEvent::ScoreAwarded {
                points: SCORE_DODGE,
                total: *score,
            });
            return false;
        }
        if obs.bounds().overlaps(&player) {
            events.push(GameEvent::PlayerHit(HitCause::Obstacle));
        }

        let mut fire_now = false;
        if let ObstacleTier::Red {
            fire_timer,
            fire_interval,
        } = &mut obs.tier
        {
            *fire_timer += 1;
            if *fire_timer > *fire_interval {
                *fire_timer = 0;
                fire_now = true;
            }
        }
        if fire_now {
            enemy_bullets.extend(spawn::enemy_volley(obs));
        }
        true
    });
}

fn spawn_obstacles(state: &mut SimulationState) {
    state.obstacle_timer += 1;
    let interval = obstacle_spawn_interval(state.score, state.tuning.obstacle_base_frequency);
    if state.obstacle_timer > interval {
        if let Some(obstacle) = spawn::spawn_obstacle(
            &mut state.rng,
            state.tuning.field_width,
            state.score,
            &state.power_ups,
        ) {
            state.obstacles.push(obstacle);
        }
        state.obstacle_timer = 0;
    }
}

fn update_power_ups(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let field_height = state.tuning.field_height;
    let multiplier = state.speed_multiplier;
    let player = state.player.bounds();
    let mut collected = None;

    state.power_ups.retain_mut(|pu| {
        pu.pos.y += pu.speed * multiplier;
        if pu.pos.y > field_height {
            return false;
        }
        if pu.bounds().overlaps(&player) {
            // Two pickups in one tick: the lowest index wins
            collected.get_or_insert((pu.kind, pu.duration_ms));
            return false;
        }
        true
    });

    if let Some((kind, duration_ms)) = collected {
        log::debug!("Picked up {:?} for {} ms", kind, duration_ms);
        state.player.activate(kind, duration_ms);
        state.orbit = particles::orbit_ring(kind);
        events.push(GameEvent::PowerUpCollected(kind));
    }
}

fn spawn_power_ups(state: &mut SimulationState) {
    state.power_up_timer += 1;
    if state.power_up_timer > state.tuning.power_up_interval {
        if let Some(power_up) =
            spawn::spawn_power_up(&mut state.rng, state.tuning.field_width, &state.obstacles)
        {
            state.power_ups.push(power_up);
        }
        state.power_up_timer = 0;
    }
}

fn countdown_power_up(state: &mut SimulationState, dt_ms: f32, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    let PowerUpState::Active { remaining_ms, .. } = &mut player.power_up else {
        return;
    };

    *remaining_ms -= dt_ms;
    let remaining = *remaining_ms;

    if remaining <= 0.0 {
        log::debug!("Power-up expired");
        player.deactivate();
        state.orbit.clear();
        events.push(GameEvent::PowerUpExpired);
        return;
    }

    player.color = if remaining <= BLINK_THRESHOLD_MS
        && (remaining / BLINK_PERIOD_MS).floor().rem_euclid(2.0) == 0.0
    {
        PlayerColor::Flash
    } else {
        PlayerColor::Base
    };
}

/// Player bullets, newest first. Each bullet kills at most one obstacle per
/// tick, scanning obstacles from the highest index down.
fn update_bullets(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let field_width = state.tuning.field_width;
    let obstacles = &mut state.obstacles;
    let score = &mut state.score;

    let bullets = std::mem::take(&mut state.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());

    for mut bullet in bullets.into_iter().rev() {
        bullet.pos += bullet.vel;
        if bullet.pos.y < 0.0 || bullet.pos.x < 0.0 || bullet.pos.x > field_width {
            continue;
        }

        let hit = bullet.bounds();
        if let Some(index) = obstacles.iter().rposition(|obs| obs.bounds().overlaps(&hit)) {
            let killed = obstacles.remove(index);
            let points = killed.tier.kill_score();
            *score += points;
            events.push(GameEvent::ScoreAwarded {
                points,
                total: *score,
            });
            continue;
        }

        survivors.push(bullet);
    }

    survivors.reverse();
    state.bullets = survivors;
}

fn update_enemy_bullets(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let field_width = state.tuning.field_width;
    let field_height = state.tuning.field_height;
    let player = state.player.bounds();

    state.enemy_bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel;
        if bullet.pos.y > field_height || bullet.pos.x < 0.0 || bullet.pos.x > field_width {
            return false;
        }
        if bullet.bounds().overlaps(&player) {
            events.push(GameEvent::PlayerHit(HitCause::EnemyBullet));
        }
        true
    });
}
