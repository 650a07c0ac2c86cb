//! Platform abstraction layer
//!
//! Handles the browser-facing edges of the game:
//! - Input events → simulation commands
//! - Time comes from `requestAnimationFrame` timestamps in the entry point

pub mod input;

pub use input::{KeyPhase, button_command, key_command};
