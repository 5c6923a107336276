//! Error types for playlist and playback operations

use groove_storage::StorageError;
use thiserror::Error;

/// Input rejected before any state was touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Playlist name is empty after trimming
    #[error("Playlist name cannot be empty")]
    EmptyName,

    /// No playlist is active
    #[error("Please create or select a valid playlist first!")]
    NoActivePlaylist,

    /// Playlist index does not exist
    #[error("Playlist index out of range: {0}")]
    PlaylistIndexOutOfRange(usize),

    /// Track index does not exist in the active playlist
    #[error("Track index out of range: {0}")]
    TrackIndexOutOfRange(usize),

    /// The only remaining playlist cannot be deleted
    #[error("Cannot delete the last playlist.")]
    LastPlaylist,
}

/// Player errors
///
/// None of these are fatal: after any error the player is still in a valid,
/// operable state.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Invalid input; no state was mutated
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The user cancelled a destructive action
    #[error("Action cancelled")]
    ConfirmationDeclined,

    /// Persisting the playlist collection failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Native playback rejected a request or failed to decode
    #[error("Playback failed: {0}")]
    Playback(String),
}

impl PlayerError {
    /// Whether a front end should show this as a blocking notice
    ///
    /// Declined confirmations are clean no-ops, and an empty playlist name is
    /// dropped silently (the create button is disabled for it anyway).
    pub fn is_user_notice(&self) -> bool {
        match self {
            PlayerError::Validation(ValidationError::EmptyName) => false,
            PlayerError::Validation(_) => true,
            PlayerError::ConfirmationDeclined => false,
            PlayerError::Storage(_) | PlayerError::Playback(_) => false,
        }
    }
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices() {
        assert!(PlayerError::from(ValidationError::LastPlaylist).is_user_notice());
        assert!(PlayerError::from(ValidationError::NoActivePlaylist).is_user_notice());
        assert!(!PlayerError::from(ValidationError::EmptyName).is_user_notice());
        assert!(!PlayerError::ConfirmationDeclined.is_user_notice());
        assert!(!PlayerError::Playback("decode".into()).is_user_notice());
    }

    #[test]
    fn messages() {
        assert_eq!(
            PlayerError::from(ValidationError::LastPlaylist).to_string(),
            "Cannot delete the last playlist."
        );
    }
}
