//! Browser LocalStorage backend

use super::{HighScoreStore, PersistenceError, parse_stored};

/// High score kept in `window.localStorage` as a decimal string
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "dodge_highscore";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load_high_score(&self) -> Result<u32, PersistenceError> {
        let storage = Self::storage()?;
        let value = storage
            .get_item(&self.key)
            .map_err(|_| PersistenceError::Unavailable)?;
        parse_stored(value.as_deref())
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &score.to_string())
            .map_err(|_| PersistenceError::Write)
    }
}
