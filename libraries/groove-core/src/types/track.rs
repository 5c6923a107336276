/// Track domain type
use super::ids::{SourceKey, TrackId};

/// A single audio item in a playlist
///
/// `source` is only valid for the in-memory session. Tracks restored from
/// storage come back with `source = None` and stay metadata-only until the
/// user adds the file again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Display title
    pub title: String,

    /// Display artist
    pub artist: String,

    /// Session-local playable source, if any
    pub source: Option<SourceKey>,
}

impl Track {
    /// Create a new track with a freshly generated id
    pub fn new(title: impl Into<String>, artist: impl Into<String>, source: Option<SourceKey>) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: artist.into(),
            source,
        }
    }

    /// Rebuild a track from persisted metadata (no playable source)
    pub fn restored(id: TrackId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            source: None,
        }
    }

    /// Whether the track can be handed to the audio backend
    pub fn is_playable(&self) -> bool {
        self.source.is_some()
    }
}
