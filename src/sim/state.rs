//! Game state and core simulation types
//!
//! A single owned `GameState` is one play session: the player, the falling
//! entities, the spawn timers and the run bookkeeping. Every component
//! operation takes it (or a piece of it) explicitly.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::StatusEffects;
use super::spawner::SpawnTimer;
use crate::error::GameError;
use crate::tuning::Tuning;

/// Named difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

/// Immutable parameters bundled by a difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub spawn_interval_ms: f64,
    pub base_speed: f32,
    pub player_speed: f32,
    pub label: &'static str,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                spawn_interval_ms: 900.0,
                base_speed: 3.0,
                player_speed: 7.0,
                label: "Easy",
            },
            Difficulty::Normal => DifficultyProfile {
                spawn_interval_ms: 700.0,
                base_speed: 4.0,
                player_speed: 7.5,
                label: "Normal",
            },
            Difficulty::Hard => DifficultyProfile {
                spawn_interval_ms: 520.0,
                base_speed: 5.5,
                player_speed: 8.5,
                label: "Hard",
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }

    /// Key used in markup (`data-diff`) and saved settings
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first run, no tick loop
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for a restart
    GameOver,
}

/// The player's craft
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity (px per reference frame)
    pub vel_x: f32,
    /// Magnitude used for left/right commands
    pub speed: f32,
    pub effects: StatusEffects,
}

impl Player {
    pub fn new(tuning: &Tuning, speed: f32) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_x: 0.0,
            speed,
            effects: StatusEffects::default(),
        };
        player.reset(tuning, speed);
        player
    }

    /// Put the player back at the start position with no velocity or effects
    pub fn reset(&mut self, tuning: &Tuning, speed: f32) {
        self.pos = Vec2::new(
            tuning.field_width / 2.0 - self.size.x / 2.0,
            tuning.field_height - tuning.player_bottom_offset,
        );
        self.vel_x = 0.0;
        self.speed = speed;
        self.effects = StatusEffects::default();
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_invincible(&self) -> bool {
        self.effects.is_invincible()
    }

    pub fn is_shielded(&self) -> bool {
        self.effects.is_shielded()
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// One extra life
    Life,
    /// One shield charge
    Shield,
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed (px per reference frame)
    pub speed: f32,
    pub kind: ItemKind,
}

impl Item {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u32,
    pub difficulty: Difficulty,
    /// Set by the session once the score is compared with the stored best
    pub new_record: bool,
}

impl RunSummary {
    pub fn label(&self) -> &'static str {
        self.difficulty.label()
    }
}

/// Things that happened during a tick, for audio/HUD feedback and persistence
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A shield charge blocked an obstacle
    ShieldAbsorbed { charges_left: u8 },
    /// An obstacle cost a life
    LifeLost { remaining: u8 },
    /// An item was picked up
    ItemCollected(ItemKind),
    /// The run ended
    GameOver(RunSummary),
}

/// Turns animation-frame timestamps into integration deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Elapsed ms since the previous call; 0 on the first call, clamped to `max_ms`
    pub fn delta(&mut self, now_ms: f64, max_ms: f64) -> f64 {
        let delta = match self.last_ms {
            Some(last) => (now_ms - last).clamp(0.0, max_ms),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Random source for spawn positions and item kinds
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub items: Vec<Item>,
    pub lives: u8,
    /// Raw score accumulator; display with `display_score`
    pub score: f64,
    /// Current obstacle fall speed (px per reference frame)
    pub obstacle_speed: f32,
    pub obstacle_timer: SpawnTimer,
    pub item_timer: SpawnTimer,
    pub clock: FrameClock,
    /// Timestamp of the most recent tick (ms)
    pub now_ms: f64,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(seed: u64, tuning: Tuning, difficulty: Difficulty) -> Self {
        let profile = difficulty.profile();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning, profile.player_speed),
            lives: tuning.starting_lives,
            obstacle_timer: SpawnTimer::new(profile.spawn_interval_ms),
            item_timer: SpawnTimer::new(tuning.item_spawn_interval_ms),
            tuning,
            difficulty,
            phase: GamePhase::Idle,
            obstacles: Vec::new(),
            items: Vec::new(),
            score: 0.0,
            obstacle_speed: profile.base_speed,
            clock: FrameClock::default(),
            now_ms: 0.0,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u32 {
        super::scoring::display_score(self.score)
    }

    /// Begin a fresh run (also used for restarts)
    pub fn start(&mut self, now_ms: f64) {
        let profile = self.profile();

        self.obstacles.clear();
        self.items.clear();
        self.score = 0.0;
        self.lives = self.tuning.starting_lives;
        self.obstacle_speed = profile.base_speed;
        self.player.reset(&self.tuning, profile.player_speed);

        self.clock.reset();
        self.now_ms = now_ms;

        self.obstacle_timer.restart(now_ms, profile.spawn_interval_ms);
        self.item_timer.restart(now_ms, self.tuning.item_spawn_interval_ms);

        self.phase = GamePhase::Running;
        log::info!("Run started on {} (seed {})", profile.label, self.seed);
    }

    /// Finish the current run
    pub fn end(&mut self, now_ms: f64) -> RunSummary {
        self.obstacle_timer.stop();
        self.item_timer.stop();
        self.phase = GamePhase::GameOver;
        self.now_ms = now_ms;

        let score = self.display_score();
        log::info!("Run over on {}: score {}", self.difficulty.label(), score);

        RunSummary {
            score,
            difficulty: self.difficulty,
            new_record: false,
        }
    }

    /// Switch tier without losing run progress
    pub fn change_difficulty(&mut self, difficulty: Difficulty, now_ms: f64) {
        self.difficulty = difficulty;
        let profile = difficulty.profile();

        self.player.speed = profile.player_speed;
        if self.player.vel_x != 0.0 {
            self.player.vel_x = profile.player_speed * self.player.vel_x.signum();
        }
        self.obstacle_speed = super::scoring::obstacle_speed(
            profile.base_speed,
            self.display_score(),
            self.tuning.speed_growth,
        );

        if self.is_running() {
            self.obstacle_timer.restart(now_ms, profile.spawn_interval_ms);
        } else {
            self.obstacle_timer.set_interval(profile.spawn_interval_ms);
        }

        log::info!("Difficulty set to {}", profile.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(7, Tuning::default(), Difficulty::Easy)
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "insane".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty("insane".to_string()))
        );
        for tier in Difficulty::ALL {
            assert_eq!(tier.as_str().parse::<Difficulty>(), Ok(tier));
        }
    }

    #[test]
    fn test_frame_clock_first_delta_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.delta(5000.0, 100.0), 0.0);
        assert_eq!(clock.delta(5016.0, 100.0), 16.0);
        assert_eq!(clock.delta(9000.0, 100.0), 100.0);
        // Out-of-order timestamps never integrate backwards
        assert_eq!(clock.delta(8000.0, 100.0), 0.0);
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(!state.obstacle_timer.is_active());
        assert!(!state.item_timer.is_active());
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = state();
        state.start(0.0);
        state.score = 55.5;
        state.lives = 1;
        state.player.pos.x = 0.0;
        state.player.vel_x = -7.0;
        state.obstacles.push(Obstacle {
            pos: Vec2::ZERO,
            size: Vec2::ONE,
        });
        state.player.effects.add_shield_charge(0.0, &state.tuning);

        state.start(1000.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.lives, 3);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.vel_x, 0.0);
        assert_eq!(state.player.pos.x, 480.0 / 2.0 - 20.0);
        assert!(!state.player.is_shielded());
        assert!(state.obstacle_timer.is_active());
        assert!(state.item_timer.is_active());
    }

    #[test]
    fn test_end_stops_run_and_summarizes() {
        let mut state = state();
        state.start(0.0);
        state.score = 42.9;
        let summary = state.end(10.0);
        assert_eq!(summary.score, 42);
        assert_eq!(summary.difficulty, Difficulty::Easy);
        assert!(!summary.new_record);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.obstacle_timer.is_active());
        assert!(!state.item_timer.is_active());
    }

    #[test]
    fn test_change_difficulty_keeps_progress() {
        let mut state = state();
        state.start(0.0);
        state.score = 120.0;
        state.lives = 2;
        state.player.vel_x = state.player.speed;

        state.change_difficulty(Difficulty::Hard, 500.0);
        assert_eq!(state.score, 120.0);
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.speed, 8.5);
        assert_eq!(state.player.vel_x, 8.5);
        assert_eq!(state.obstacle_timer.interval_ms(), 520.0);
        assert_eq!(state.obstacle_timer.next_due_ms(), Some(1020.0));
    }

    #[test]
    fn test_change_difficulty_keeps_speed_ramp() {
        let mut state = state();
        state.start(0.0);
        state.score = 500.0;
        state.obstacle_speed = 13.0;

        state.change_difficulty(Difficulty::Hard, 100.0);
        assert!((state.obstacle_speed - 15.5).abs() < 1e-4);
    }

    #[test]
    fn test_change_difficulty_while_idle_does_not_start_timer() {
        let mut state = state();
        state.change_difficulty(Difficulty::Normal, 100.0);
        assert!(!state.obstacle_timer.is_active());
        assert_eq!(state.obstacle_timer.interval_ms(), 700.0);

        state.start(200.0);
        assert_eq!(state.obstacle_timer.next_due_ms(), Some(900.0));
    }
}
