/// Capability traits for Groove Player
///
/// The player never talks to a browser, a disk, or a dialog directly. Hosts
/// implement these traits and hand them to the playback driver.
use crate::error::Result;
use std::fmt;

/// String-keyed persistent store
///
/// Mirrors the browser's `localStorage`: whole string values under string
/// keys, with no transactional guarantees.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key` (no-op if absent)
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Identifier of a single native play request
///
/// Tickets increase monotonically. Only the most recent outstanding ticket is
/// meaningful; completions for older tickets are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayTicket(u64);

impl PlayTicket {
    /// Wrap a raw ticket number
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw ticket number
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The ticket issued after this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PlayTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "play#{}", self.0)
    }
}

/// Native audio playback capability
///
/// A single playback object with a mutable source. All methods are requests:
/// the backend reports what actually happened through lifecycle events
/// (started, paused, ended, ...) and, for `play`, through a later completion
/// carrying the same ticket.
pub trait AudioBackend {
    /// Assign `locator` as the current source without starting playback
    fn stage(&mut self, locator: &str);

    /// Stop and remove the current source
    fn clear(&mut self);

    /// Request playback; completion is reported asynchronously with `ticket`
    fn play(&mut self, ticket: PlayTicket);

    /// Request pause
    fn pause(&mut self);

    /// Move the playback position to `position_secs`
    fn seek(&mut self, position_secs: f64);

    /// Release a transient source handle that no track references anymore
    fn release(&mut self, locator: &str);
}

/// A destructive action awaiting user confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPrompt {
    /// Delete a whole playlist
    DeletePlaylist {
        /// Name of the playlist
        name: String,
    },

    /// Remove a single track from the active playlist
    RemoveTrack {
        /// Title of the track
        title: String,
    },
}

impl ConfirmPrompt {
    /// Message shown to the user
    pub fn message(&self) -> String {
        match self {
            ConfirmPrompt::DeletePlaylist { name } => {
                format!("Are you sure you want to delete the playlist \"{}\"?", name)
            }
            ConfirmPrompt::RemoveTrack { title } => {
                format!("Are you sure you want to remove \"{}\"?", title)
            }
        }
    }
}

/// User confirmation for destructive actions
pub trait Confirm {
    /// Ask the user; `false` means the action was declined
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmPrompt) -> bool,
{
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self(prompt)
    }
}
