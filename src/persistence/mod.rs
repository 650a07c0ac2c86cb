//! High score persistence
//!
//! The game stores exactly one number: the best score. Storage may be missing
//! (private browsing, disabled storage, native builds) so every failure is
//! reported as a `PersistenceError` and callers fall back to memory.

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Persistence failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("stored high score is corrupt: {0:?}")]
    Corrupt(String),

    #[error("failed to write high score")]
    Write,
}

/// Where the high score lives between sessions
pub trait HighScoreStore {
    /// Stored high score, `Ok(0)` when nothing has been saved yet
    fn load_high_score(&self) -> Result<u32, PersistenceError>;

    fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError>;
}

/// Parse a stored value; an absent value means no record yet
pub fn parse_stored(value: Option<&str>) -> Result<u32, PersistenceError> {
    match value {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PersistenceError::Corrupt(raw.to_string())),
    }
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(score: u32) -> Self {
        Self { value: Some(score) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<u32, PersistenceError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError> {
        self.value = Some(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored() {
        assert_eq!(parse_stored(None), Ok(0));
        assert_eq!(parse_stored(Some("42")), Ok(42));
        assert_eq!(parse_stored(Some(" 7\n")), Ok(7));
        assert_eq!(
            parse_stored(Some("abc")),
            Err(PersistenceError::Corrupt("abc".to_string()))
        );
        assert!(parse_stored(Some("-3")).is_err());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_high_score(), Ok(0));
        store.save_high_score(99).unwrap();
        assert_eq!(store.load_high_score(), Ok(99));
    }
}
