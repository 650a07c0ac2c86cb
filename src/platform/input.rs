//! Keyboard and button mapping
//!
//! Raw browser event data (key names, `data-diff` attributes) is turned into
//! `Command`s here so the mapping can be tested without a DOM.

use crate::error::GameError;
use crate::sim::{Command, Difficulty};

/// Whether a key went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

fn is_left(key: &str) -> bool {
    matches!(key, "ArrowLeft" | "Left")
}

fn is_right(key: &str) -> bool {
    matches!(key, "ArrowRight" | "Right")
}

/// Map a keyboard event (`KeyboardEvent.key` and `.code`) to a command
pub fn key_command(key: &str, code: &str, phase: KeyPhase) -> Option<Command> {
    match phase {
        KeyPhase::Down if is_left(key) => Some(Command::MoveLeft),
        KeyPhase::Down if is_right(key) => Some(Command::MoveRight),
        KeyPhase::Down if code == "Space" => Some(Command::StartOrRestart),
        KeyPhase::Up if is_left(key) || is_right(key) => Some(Command::StopMoving),
        _ => None,
    }
}

/// Map a difficulty button's `data-diff` value to a command
pub fn button_command(data_diff: &str) -> Result<Command, GameError> {
    data_diff
        .parse::<Difficulty>()
        .map(Command::SelectDifficulty)
}
