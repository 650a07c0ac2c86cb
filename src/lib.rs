//! Neon Dodge - A falling-obstacle arcade game on a 2D canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, effects, scoring)
//! - `renderer`: Canvas 2D drawing (wasm only)
//! - `platform`: Browser input mapping
//! - `persistence`: High score storage
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use highscores::HighScore;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Duration of one 60 Hz reference frame (ms). Speeds are in px per reference frame.
    pub const REFERENCE_FRAME_MS: f64 = 16.67;
    /// Largest delta a single tick may integrate (tab switches, debugger pauses)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Distance from the player's top edge to the bottom of the field
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Grace period after losing a life (ms)
    pub const INVINCIBILITY_DURATION_MS: f64 = 1500.0;
    /// Grace period after a shield absorbs a hit (ms)
    pub const SHIELD_HIT_GRACE_MS: f64 = 300.0;
    /// Lifetime of one shield charge (ms)
    pub const SHIELD_DURATION_MS: f64 = 15_000.0;
    pub const MAX_SHIELD_CHARGES: u8 = 2;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const OBSTACLE_HEIGHT: f32 = 26.0;
    pub const MAX_OBSTACLES: usize = 64;

    /// Item defaults
    pub const ITEM_SIZE: f32 = 30.0;
    pub const ITEM_SPEED: f32 = 3.0;
    pub const ITEM_SPAWN_INTERVAL_MS: f64 = 10_000.0;
    /// Probability that a spawned item is a life (the rest are shields)
    pub const ITEM_LIFE_WEIGHT: f64 = 0.3;
    pub const MAX_ITEMS: usize = 16;

    /// Score gained per millisecond survived
    pub const SCORE_RATE: f64 = 0.02;
    /// Obstacle speed gained per displayed score point
    pub const SPEED_GROWTH: f32 = 0.02;
}

/// Scale factor converting a per-reference-frame speed into a distance for `delta_ms`
#[inline]
pub fn frame_scale(delta_ms: f64) -> f32 {
    (delta_ms / consts::REFERENCE_FRAME_MS) as f32
}
