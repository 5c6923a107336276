//! Domain types for Groove Player

mod ids;
mod playlist;
mod track;

pub use ids::{SourceKey, TrackId};
pub use playlist::Playlist;
pub use track::Track;
