//! Session-local playable source handles
//!
//! Tracks refer to their audio by [`SourceKey`]. The registry maps keys to
//! the platform locator (object URL, file path) and is the only place a
//! locator is released, so handles never outlive the track that owns them.

use groove_core::SourceKey;
use std::collections::HashMap;

/// Arena of registered source locators
#[derive(Debug, Default)]
pub struct SourceRegistry {
    next: u64,
    entries: HashMap<SourceKey, String>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `locator` and return its key
    ///
    /// Keys are never reused within a session.
    pub fn register(&mut self, locator: impl Into<String>) -> SourceKey {
        let key = SourceKey::new(self.next);
        self.next += 1;
        self.entries.insert(key, locator.into());
        key
    }

    /// Locator registered under `key`
    pub fn locator(&self, key: SourceKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Whether `key` is still live
    pub fn contains(&self, key: SourceKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Forget `key`, returning the locator the platform must release
    pub fn release(&mut self, key: SourceKey) -> Option<String> {
        self.entries.remove(&key)
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handles are live
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
