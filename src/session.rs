//! A play session: simulation state plus the persistence collaborator
//!
//! The platform layer owns one `Session`, forwards input commands to it and
//! calls `frame` once per animation frame.

use crate::highscores::HighScore;
use crate::persistence::HighScoreStore;
use crate::sim::{self, Command, Difficulty, GameEvent, GameState, RunSummary};
use crate::tuning::Tuning;

pub struct Session<S: HighScoreStore> {
    state: GameState,
    high_score: HighScore<S>,
    last_summary: Option<RunSummary>,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(seed: u64, tuning: Tuning, difficulty: Difficulty, store: S) -> Self {
        Self {
            state: GameState::new(seed, tuning, difficulty),
            high_score: HighScore::load(store),
            last_summary: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn store(&self) -> &S {
        self.high_score.store()
    }

    /// Summary of the most recent finished run
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    /// Forward an input command; returns true when a run started
    pub fn handle(&mut self, command: Command, now_ms: f64) -> bool {
        let started = sim::handle_command(&mut self.state, command, now_ms);
        if started {
            self.last_summary = None;
        }
        started
    }

    /// Run spawners and one tick, settling the high score if the run ended
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let mut events = sim::frame(&mut self.state, now_ms);
        for event in &mut events {
            if let GameEvent::GameOver(summary) = event {
                self.high_score.record(summary);
                self.last_summary = Some(summary.clone());
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::PersistenceError;
    use crate::sim::{GamePhase, Obstacle};
    use glam::Vec2;

    /// Store that remembers every save call
    #[derive(Default)]
    struct RecordingStore {
        stored: u32,
        saves: Vec<u32>,
    }

    impl HighScoreStore for RecordingStore {
        fn load_high_score(&self) -> Result<u32, PersistenceError> {
            Ok(self.stored)
        }

        fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError> {
            self.saves.push(score);
            self.stored = score;
            Ok(())
        }
    }

    /// Start a run, reach `score`, then die on the next frame
    fn play_to(session: &mut Session<RecordingStore>, score: f64, now_ms: f64) -> Vec<GameEvent> {
        session.handle(Command::StartOrRestart, now_ms);
        session.frame(now_ms);
        session.state.score = score;
        session.state.lives = 1;
        let pos = session.state.player.pos + Vec2::new(5.0, 5.0);
        session.state.obstacles.push(Obstacle {
            pos,
            size: Vec2::new(70.0, 26.0),
        });
        session.frame(now_ms + 16.0)
    }

    fn session_with(stored: u32) -> Session<RecordingStore> {
        let store = RecordingStore {
            stored,
            saves: Vec::new(),
        };
        Session::new(5, Tuning::default(), Difficulty::Easy, store)
    }

    #[test]
    fn test_new_record_is_saved() {
        let mut session = session_with(30);
        assert_eq!(session.high_score(), 30);

        let events = play_to(&mut session, 42.0, 0.0);
        assert!(matches!(events.last(), Some(GameEvent::GameOver(_))));
        assert_eq!(session.state().phase, GamePhase::GameOver);
        assert_eq!(session.store().saves, vec![42]);
        assert_eq!(session.high_score(), 42);
        assert_eq!(session.last_summary().map(|s| s.new_record), Some(true));
        // The emitted event carries the settled flag too
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver(RunSummary { new_record: true, .. }))
        ));
    }

    #[test]
    fn test_lower_score_is_not_saved() {
        let mut session = session_with(30);
        play_to(&mut session, 20.0, 0.0);
        assert!(session.store().saves.is_empty());
        assert_eq!(session.high_score(), 30);
        assert_eq!(session.last_summary().map(|s| s.score), Some(20));
        assert_eq!(session.last_summary().map(|s| s.new_record), Some(false));
    }

    #[test]
    fn test_restart_clears_summary_and_keeps_best() {
        let mut session = session_with(0);
        play_to(&mut session, 12.0, 0.0);
        play_to(&mut session, 8.0, 1000.0);
        assert_eq!(session.store().saves, vec![12]);

        assert!(session.handle(Command::StartOrRestart, 5000.0));
        assert!(session.last_summary().is_none());
        assert_eq!(session.high_score(), 12);
    }
}
