//! Groove Player - Playlist and Playback Coordination
//!
//! Platform-agnostic playlist management and playback coordination for
//! Groove Player.
//!
//! This crate provides:
//! - Playlist management (create, select, rename, delete)
//! - Track management (add audio files, remove tracks)
//! - Playback control (play, toggle, next/previous with wrap-around, seek)
//! - File name metadata parsing (`Artist - Title.ext`)
//! - Session-local source handle bookkeeping
//! - Presentation helpers (time labels, progress, now-playing header)
//!
//! # Architecture
//!
//! - [`Coordinator`] is a pure state machine: every operation returns a
//!   [`Transition`] listing the [`AudioCommand`]s the native playback object
//!   must execute. Native lifecycle notifications come back as
//!   [`AudioEvent`]s.
//! - [`Player`] drives a coordinator against an
//!   [`AudioBackend`](groove_core::AudioBackend) and persists playlists
//!   through a [`KeyValueStore`](groove_core::KeyValueStore).
//! - With the `wasm` feature, `WasmPlayer` binds everything to an
//!   `HTMLAudioElement` and `window.localStorage`.
//!
//! # Example
//!
//! ```rust
//! use groove_playback::{AudioCommand, Coordinator, IncomingFile, PlayerConfig};
//!
//! let mut coordinator = Coordinator::new(PlayerConfig::default(), Vec::new());
//!
//! // Adding to an empty playlist stages the first track without playing it
//! let tx = coordinator
//!     .add_files(vec![IncomingFile::new("Artist - Song.mp3", "audio/mpeg", "blob:1")])
//!     .unwrap();
//! assert_eq!(tx.commands[0], AudioCommand::Stage { locator: "blob:1".into() });
//! assert!(!coordinator.is_playing());
//!
//! // Toggling requests native playback
//! let tx = coordinator.toggle_play_pause().unwrap();
//! assert!(matches!(tx.commands[0], AudioCommand::Play { .. }));
//! ```
//!
//! # Example: Driving a Backend
//!
//! ```rust
//! use groove_core::{AudioBackend, PlayTicket};
//! use groove_playback::{Player, PlayerConfig};
//! use groove_storage::MemoryStore;
//!
//! #[derive(Default)]
//! struct SilentBackend;
//!
//! impl AudioBackend for SilentBackend {
//!     fn stage(&mut self, _locator: &str) {}
//!     fn clear(&mut self) {}
//!     fn play(&mut self, _ticket: PlayTicket) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position_secs: f64) {}
//!     fn release(&mut self, _locator: &str) {}
//! }
//!
//! let mut player = Player::open(PlayerConfig::default(), SilentBackend, MemoryStore::new());
//! player.create_playlist("Road Trip").unwrap();
//! assert_eq!(player.playlists().len(), 2);
//! ```

mod coordinator;
#[cfg(any(feature = "wasm", test))]
mod deferred;
mod error;
pub mod events;
pub mod metadata;
mod player;
mod sources;
pub mod types;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use coordinator::Coordinator;
pub use error::{PlayerError, Result, ValidationError};
pub use events::{AudioCommand, AudioEvent, PlayerEvent, Transition};
pub use metadata::{is_audio_mime, parse_file_name, TrackMetadata};
pub use player::Player;
pub use sources::SourceRegistry;
pub use types::{IncomingFile, PlayerConfig, PlayerState};
pub use view::{format_time, progress_percent, ControlAvailability, NowPlaying};
