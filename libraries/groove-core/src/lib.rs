//! Groove Player Core
//!
//! Platform-agnostic domain types, capability traits, and error handling for
//! Groove Player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `Track`, `TrackId`, `SourceKey`
//! - **Capability Traits**: `KeyValueStore`, `AudioBackend`, `Confirm`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! Nothing here touches a browser, a file system, or an audio device. Those
//! are supplied by the host through the traits.
//!
//! # Example
//!
//! ```rust
//! use groove_core::{Playlist, Track};
//!
//! let mut playlist = Playlist::new("Road Trip");
//! playlist.tracks.push(Track::new("Song Title", "Artist Name", None));
//!
//! assert_eq!(playlist.len(), 1);
//! assert!(!playlist.tracks[0].is_playable());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::{AudioBackend, Confirm, ConfirmPrompt, KeyValueStore, PlayTicket};
pub use types::{Playlist, SourceKey, Track, TrackId};
