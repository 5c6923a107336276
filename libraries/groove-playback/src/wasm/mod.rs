//! WASM bindings for groove-playback
//!
//! Binds the player to an `HTMLAudioElement` and `window.localStorage` so the
//! coordinator can run inside a browser page.

pub mod backend;
pub mod player;
pub mod types;

pub use backend::ElementBackend;
pub use player::WasmPlayer;
pub use types::{PlayerSnapshot, WasmPlaylist, WasmTrack};
