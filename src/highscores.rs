//! High score tracking
//!
//! Loaded once at startup, saved only when a finished run sets a new record.
//! Storage failures never interrupt play: the best score simply stays in
//! memory for the rest of the session.

use crate::persistence::HighScoreStore;
use crate::sim::RunSummary;

/// Best score plus the store it came from
#[derive(Debug)]
pub struct HighScore<S: HighScoreStore> {
    best: u32,
    store: S,
}

impl<S: HighScoreStore> HighScore<S> {
    /// Load the stored high score, falling back to 0 when storage fails
    pub fn load(store: S) -> Self {
        let best = match store.load_high_score() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(e) => {
                log::warn!("Could not load high score ({}), starting from 0", e);
                0
            }
        };
        Self { best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Settle a finished run against the best score; saves on a new record
    ///
    /// Marks `summary.new_record` and returns it.
    pub fn record(&mut self, summary: &mut RunSummary) -> bool {
        summary.new_record = summary.score > self.best;
        if !summary.new_record {
            return false;
        }
        self.best = summary.score;
        match self.store.save_high_score(self.best) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("Could not save high score {}: {}", self.best, e),
        }
        true
    }
}
