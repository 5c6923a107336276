/// Playlist domain type
use super::track::Track;

/// Named, ordered collection of tracks
///
/// Identity is positional: a playlist is addressed by its index in the
/// collection, and names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Playlist {
    /// Display name (non-empty)
    pub name: String,

    /// Tracks in play order
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Create a new, empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    /// Create a playlist with tracks
    pub fn with_tracks(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`, if it exists
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }
}
