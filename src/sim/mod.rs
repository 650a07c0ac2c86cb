//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only comes in as caller-supplied timestamps
//! - Seeded RNG only
//! - Timed effects are stored expiries, never deferred callbacks
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod motion;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use effects::{EffectState, HitOutcome, ShieldState, StatusEffects};
pub use spawner::{SpawnTimer, run_spawners};
pub use state::{
    Difficulty, DifficultyProfile, FrameClock, GameEvent, GamePhase, GameState, Item, ItemKind,
    Obstacle, Player, RunSummary,
};
pub use tick::{Command, frame, handle_command, tick};
