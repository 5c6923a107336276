//! Playback Events
//!
//! Three directions of traffic around the coordinator:
//! - [`AudioEvent`]: native playback lifecycle notifications coming in
//! - [`AudioCommand`]: requests going out to the native playback object
//! - [`PlayerEvent`]: notifications for the presentation layer

use groove_core::{PlayTicket, TrackId};
use serde::{Deserialize, Serialize};

/// Lifecycle notification from the native audio capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioEvent {
    /// Playback position moved (periodic while playing)
    TimeUpdated {
        /// Current position in seconds
        position: f64,
    },

    /// Metadata for the staged source is available
    MetadataLoaded {
        /// Duration in seconds (may be NaN/infinite for streams)
        duration: f64,
    },

    /// Enough data is buffered to start playing
    ReadyToPlay {
        /// Duration in seconds, if known by now
        duration: Option<f64>,
    },

    /// Playback actually started
    Started,

    /// Playback actually paused
    Paused,

    /// The staged source played to its end
    Ended,

    /// Decoding or loading failed
    Errored {
        /// Human-readable description
        message: String,
    },
}

/// Request for the native audio capability
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Assign a source without starting playback
    Stage {
        /// Platform locator of the source
        locator: String,
    },

    /// Stop and remove the current source
    Clear,

    /// Start playback; the completion is reported back with `ticket`
    Play {
        /// Identifier of this request
        ticket: PlayTicket,
    },

    /// Pause playback
    Pause,

    /// Jump to an absolute position
    Seek {
        /// Target position in seconds
        position: f64,
    },

    /// Free a transient handle no track refers to anymore
    Release {
        /// Platform locator to release
        locator: String,
    },
}

/// Notification for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playlist collection changed (names, membership, or tracks)
    PlaylistsChanged,

    /// A different playlist became active
    ActivePlaylistChanged {
        /// Index of the active playlist
        index: usize,
    },

    /// A different track became active
    TrackChanged {
        /// Id of the active track, if any
        track_id: Option<TrackId>,
    },

    /// Play intent flipped
    IntentChanged {
        /// Whether playback is wanted
        playing: bool,
    },

    /// Position or duration changed
    PositionChanged {
        /// Position in seconds
        position: f64,
        /// Duration in seconds (0 when unknown)
        duration: f64,
    },

    /// Native playback failed; the user may retry
    PlaybackFailed {
        /// Human-readable description
        message: String,
    },

    /// Stored playlists were unusable and have been reset
    StorageRecovered {
        /// Why the stored value was discarded
        reason: String,
    },
}

/// Outcome of a coordinator operation
///
/// Commands must be applied to the native capability in order. When
/// `playlists_changed` is set the whole collection should be persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    /// Native requests, in application order
    pub commands: Vec<AudioCommand>,

    /// Whether the playlist collection was mutated
    pub playlists_changed: bool,
}

impl Transition {
    /// A transition with no effects
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether applying this transition does nothing
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && !self.playlists_changed
    }

    pub(crate) fn push(&mut self, command: AudioCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transition() {
        assert!(Transition::none().is_empty());

        let mut tx = Transition::none();
        tx.push(AudioCommand::Pause);
        assert!(!tx.is_empty());

        let changed = Transition {
            playlists_changed: true,
            ..Default::default()
        };
        assert!(!changed.is_empty());
    }
}
