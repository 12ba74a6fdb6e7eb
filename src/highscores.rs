//! High score tracking
//!
//! A single best score, seeded from the store at startup and written back
//! only when beaten.

use crate::persistence::ScoreStore;

/// High score tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Seed from the store; missing or malformed values count as 0
    pub fn load<S: ScoreStore + ?Sized>(store: &S) -> Self {
        match store.load(Self::STORAGE_KEY) {
            Some(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a score. Saves and returns true only if it strictly beats the best.
    pub fn submit<S: ScoreStore + ?Sized>(&mut self, score: u64, store: &mut S) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        store.save(Self::STORAGE_KEY, score);
        log::info!("New high score {}", score);
        true
    }
}
