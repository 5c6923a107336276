//! Groove Player Storage
//!
//! Persists the playlist collection under a single string key of a
//! [`KeyValueStore`](groove_core::KeyValueStore).
//!
//! # Architecture
//!
//! - **Whole-collection writes**: every change rewrites the full snapshot
//! - **Metadata only**: session-local source handles are never written
//! - **Tolerant restore**: corrupted values are discarded, never fatal
//!
//! # Example
//!
//! ```rust
//! use groove_core::Playlist;
//! use groove_storage::{MemoryStore, PlaylistRepository, RepositoryConfig};
//!
//! let mut repo = PlaylistRepository::new(MemoryStore::new(), RepositoryConfig::default());
//!
//! // Nothing stored yet: one default playlist is synthesized
//! let restored = repo.load();
//! assert_eq!(restored.playlists.len(), 1);
//! assert_eq!(restored.playlists[0].name, "My Music");
//!
//! repo.save(&[Playlist::new("Road Trip")]).unwrap();
//! assert_eq!(repo.load().playlists[0].name, "Road Trip");
//! ```

mod error;

// Vertical slices
pub mod playlists;
pub mod stores;

pub use error::{Result, StorageError};
pub use playlists::{PlaylistRepository, Recovery, RepositoryConfig, Restored, PLAYLISTS_KEY};
pub use stores::{FileStore, MemoryStore};

#[cfg(feature = "web")]
pub use stores::LocalStorageStore;
