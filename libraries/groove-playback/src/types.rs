//! Core types for playback coordination

use groove_storage::RepositoryConfig;
use serde::{Deserialize, Serialize};

/// Player state owned by the coordinator
///
/// `active_playlist` always indexes an existing playlist. `active_track`
/// indexes into the active playlist, or is meaningless (0) when it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Index of the active playlist
    pub active_playlist: usize,

    /// Index of the active track within the active playlist
    pub active_track: usize,

    /// Desired playback state, reconciled against native events
    pub play_intent: bool,

    /// Playback position in seconds
    pub position: f64,

    /// Duration of the staged track in seconds (0 when unknown)
    pub duration: f64,
}

/// A file offered to `add_files`
///
/// `locator` is the platform's transient handle to the data (object URL,
/// file path). Files the player rejects get their locator released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    /// File name including extension
    pub name: String,

    /// MIME type reported by the platform
    pub mime_type: String,

    /// Playable locator, if one was created
    pub locator: Option<String>,
}

impl IncomingFile {
    /// Create an incoming file with a locator
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            locator: Some(locator.into()),
        }
    }
}

/// Configuration for the player
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Persistence key and restore defaults
    pub storage: RepositoryConfig,
}

impl PlayerConfig {
    /// Artist used when a file name carries none
    pub fn unknown_artist(&self) -> &str {
        &self.storage.unknown_artist
    }
}
