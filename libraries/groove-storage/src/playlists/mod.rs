//! Playlist collection persistence
//!
//! The whole collection lives under one key. `load` never fails: a missing,
//! unreadable, or corrupted value restores a single default playlist so the
//! player always starts in a usable state.

pub mod codec;

use crate::error::Result;
use groove_core::{KeyValueStore, Playlist};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Key under which the playlist collection is stored
pub const PLAYLISTS_KEY: &str = "musicPlayerPlaylists";

/// Restore and naming settings for the playlist collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Store key holding the serialized collection (default: "musicPlayerPlaylists")
    pub key: String,

    /// Name of the playlist synthesized when nothing usable is stored (default: "My Music")
    pub default_playlist_name: String,

    /// Name given to restored playlists without one (default: "Untitled Playlist")
    pub untitled_playlist_name: String,

    /// Title given to restored tracks without one (default: "Unknown Title")
    pub unknown_title: String,

    /// Artist given to tracks without one (default: "Unknown Artist")
    pub unknown_artist: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            key: PLAYLISTS_KEY.to_string(),
            default_playlist_name: "My Music".to_string(),
            untitled_playlist_name: "Untitled Playlist".to_string(),
            unknown_title: "Unknown Title".to_string(),
            unknown_artist: "Unknown Artist".to_string(),
        }
    }
}

/// How a restore deviated from the stored value, if at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// Stored collection restored as-is
    None,

    /// Nothing stored under the key
    Missing,

    /// Stored collection was an empty array
    Empty,

    /// Store could not be read
    Unreadable(String),

    /// Stored value was discarded and the key cleared
    Corrupted(String),
}

/// Result of restoring the playlist collection
#[derive(Debug, Clone)]
pub struct Restored {
    /// Restored playlists (never empty)
    pub playlists: Vec<Playlist>,

    /// How the restore deviated from the stored value
    pub recovery: Recovery,
}

impl Restored {
    /// Whether stored data had to be thrown away
    pub fn discarded_data(&self) -> bool {
        matches!(self.recovery, Recovery::Corrupted(_))
    }
}

/// Loads and saves the playlist collection through a key-value store
pub struct PlaylistRepository<S> {
    store: S,
    config: RepositoryConfig,
}

impl<S: KeyValueStore> PlaylistRepository<S> {
    /// Create a repository over `store`
    pub fn new(store: S, config: RepositoryConfig) -> Self {
        Self { store, config }
    }

    /// Repository settings
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Restore the collection
    ///
    /// Corrupted values are removed from the store so the next start is clean.
    pub fn load(&mut self) -> Restored {
        let raw = match self.store.get(&self.config.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.config.key, "No stored playlists, using default");
                return self.fallback(Recovery::Missing);
            }
            Err(e) => {
                warn!(key = %self.config.key, "Failed to read stored playlists: {}", e);
                return self.fallback(Recovery::Unreadable(e.to_string()));
            }
        };

        match codec::decode(&raw, &self.config) {
            Ok(playlists) if playlists.is_empty() => {
                debug!("Stored playlist collection is empty, using default");
                self.fallback(Recovery::Empty)
            }
            Ok(playlists) => {
                info!(count = playlists.len(), "Restored playlists");
                Restored {
                    playlists,
                    recovery: Recovery::None,
                }
            }
            Err(e) => {
                warn!(key = %self.config.key, "Discarding corrupted playlists: {}", e);
                if let Err(remove_err) = self.store.remove(&self.config.key) {
                    warn!("Failed to clear corrupted playlists: {}", remove_err);
                }
                self.fallback(Recovery::Corrupted(e.to_string()))
            }
        }
    }

    /// Rewrite the whole collection
    pub fn save(&mut self, playlists: &[Playlist]) -> Result<()> {
        let encoded = codec::encode(playlists)?;
        self.store.set(&self.config.key, &encoded)?;
        debug!(count = playlists.len(), bytes = encoded.len(), "Saved playlists");
        Ok(())
    }

    /// Remove the stored collection
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.config.key)?;
        Ok(())
    }

    fn fallback(&self, recovery: Recovery) -> Restored {
        Restored {
            playlists: vec![Playlist::new(self.config.default_playlist_name.clone())],
            recovery,
        }
    }
}
