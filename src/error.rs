//! Error types for configuration and input boundaries

use thiserror::Error;

/// Errors raised at the edges of the game core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("unknown difficulty tier: {0:?}")]
    UnknownDifficulty(String),

    #[error("invalid tuning: {field} {reason}")]
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to parse tuning JSON: {0}")]
    TuningParse(String),
}
