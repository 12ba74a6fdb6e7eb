//! Session state machine
//!
//! Wraps the simulation with the paused/running/ended/terminated lifecycle,
//! high-score persistence and host notifications. Frames requested outside
//! `Running` are ignored, so a stopped scheduler can never advance the game.

use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::sim::{
    GameEvent, PowerUpKind, RenderSnapshot, SimError, SimulationState, TickInput, invariants, tick,
};
use crate::tuning::Tuning;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player to press start
    Paused,
    /// Ticking
    Running,
    /// Player was hit; waiting for restart or terminate
    Ended,
    /// No further simulation
    Terminated,
}

/// Host notifications. All methods default to no-ops.
pub trait GameHooks {
    /// Game left the initial pause
    fn on_game_start(&mut self) {}
    /// Player was hit; the host should offer restart/terminate
    fn on_game_ended(&mut self) {}
    /// Score changed (after every award and after a reset)
    fn on_score_changed(&mut self, _score: u64, _high_score: u64) {}
    /// Power-up picked up (`Some`) or run out (`None`)
    fn on_power_up_changed(&mut self, _kind: Option<PowerUpKind>) {}
}

/// Hooks that ignore everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl GameHooks for NoHooks {}

/// Result of one `frame` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not running; nothing happened
    Skipped,
    /// One tick ran; keep scheduling
    Advanced,
    /// The tick ended the game; stop scheduling
    Ended,
}

/// One player's session: simulation, phase, high score and collaborators
pub struct Session<S: ScoreStore, H: GameHooks> {
    state: SimulationState,
    phase: GamePhase,
    high_score: HighScore,
    store: S,
    hooks: H,
}

impl<S: ScoreStore, H: GameHooks> Session<S, H> {
    /// New paused session. Reads the high score from `store` once.
    pub fn new(tuning: Tuning, seed: u64, store: S, hooks: H) -> Self {
        let high_score = HighScore::load(&store);
        log::info!("Session created with seed {}", seed);
        Self {
            state: SimulationState::new(tuning, seed),
            phase: GamePhase::Paused,
            high_score,
            store,
            hooks,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable simulation access for hosts that script scenarios
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Leave the initial pause
    pub fn start(&mut self) {
        if self.phase != GamePhase::Paused {
            log::warn!("start() ignored in phase {:?}", self.phase);
            return;
        }
        self.phase = GamePhase::Running;
        log::info!("Game started");
        self.hooks.on_game_start();
    }

    /// Run one tick if the session is running.
    ///
    /// An invariant violation terminates the session and is returned to the
    /// host; the state is left as the failing tick produced it.
    pub fn frame(&mut self, input: &TickInput, dt_ms: f32) -> Result<FrameOutcome, SimError> {
        if self.phase != GamePhase::Running {
            return Ok(FrameOutcome::Skipped);
        }

        let events = tick(&mut self.state, input, dt_ms);

        let mut hit = false;
        for event in &events {
            match *event {
                GameEvent::ScoreAwarded { total, .. } => {
                    self.high_score.submit(total, &mut self.store);
                    self.hooks.on_score_changed(total, self.high_score.best());
                }
                GameEvent::PowerUpCollected(kind) => self.hooks.on_power_up_changed(Some(kind)),
                GameEvent::PowerUpExpired => self.hooks.on_power_up_changed(None),
                GameEvent::Fired { count } => log::trace!("Fired {} bullet(s)", count),
                GameEvent::PlayerHit(cause) => {
                    if !hit {
                        log::debug!("Player hit by {:?}", cause);
                    }
                    hit = true;
                }
            }
        }

        if let Err(e) = invariants::check(&self.state) {
            log::error!("Stopping simulation: {}", e);
            self.phase = GamePhase::Terminated;
            return Err(e);
        }

        if hit {
            log::info!("Game over with score {}", self.state.score);
            self.phase = GamePhase::Ended;
            self.hooks.on_game_ended();
            return Ok(FrameOutcome::Ended);
        }

        Ok(FrameOutcome::Advanced)
    }

    /// Start a new life after a game over. Keeps the high score.
    pub fn restart(&mut self) {
        if self.phase != GamePhase::Ended {
            log::warn!("restart() ignored in phase {:?}", self.phase);
            return;
        }
        self.state.reset();
        self.phase = GamePhase::Running;
        log::info!("Game restarted");
        self.hooks
            .on_score_changed(self.state.score, self.high_score.best());
    }

    /// Decline the restart; the session never ticks again
    pub fn terminate(&mut self) {
        if self.phase == GamePhase::Terminated {
            return;
        }
        self.phase = GamePhase::Terminated;
        log::info!("Game terminated");
    }

    /// Read-only view for the render pass
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot::new(&self.state, self.high_score.best())
    }
}
