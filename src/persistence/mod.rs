//! Scalar score persistence
//!
//! The game stores exactly one integer. Stored text that does not parse as a
//! non-negative integer is treated as absent.

use std::collections::HashMap;

/// Key/value store holding plain integers
pub trait ScoreStore {
    fn load(&self, key: &str) -> Option<u64>;
    fn save(&mut self, key: &str, value: u64);
}

/// Parse a stored score, logging and discarding anything malformed.
/// The whole trimmed text must be an integer; `"100abc"` is rejected.
pub fn parse_stored_score(key: &str, raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed value {:?} for {}: {}", raw, key, e);
            None
        }
    }
}

/// In-memory store (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw text under a key, bypassing integer formatting
    pub fn insert_raw(&mut self, key: &str, raw: &str) {
        self.items.insert(key.to_string(), raw.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Option<u64> {
        self.items.get(key).and_then(|raw| parse_stored_score(key, raw))
    }

    fn save(&mut self, key: &str, value: u64) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self, key: &str) -> Option<u64> {
        let raw = Self::storage()?.get_item(key).ok()??;
        parse_stored_score(key, &raw)
    }

    fn save(&mut self, key: &str, value: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, &value.to_string()).is_err() {
                    log::warn!("LocalStorage rejected write of {}", key);
                }
            }
            None => log::warn!("LocalStorage unavailable, {} not saved", key),
        }
    }
}
