//! WASM-compatible type definitions
//!
//! Plain serializable projections of the player handed to JavaScript with
//! `serde_wasm_bindgen`. Source handles never cross the boundary; a track
//! only says whether it is playable.

use crate::{
    types::PlayerState,
    view::{format_time, progress_percent, ControlAvailability, NowPlaying},
    Coordinator,
};
use groove_core::{Playlist, Track};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmTrack {
    id: String,
    title: String,
    artist: String,
    playable: bool,
}

impl From<&Track> for WasmTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.as_str().to_string(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            playable: track.is_playable(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmPlaylist {
    name: String,
    tracks: Vec<WasmTrack>,
}

impl From<&Playlist> for WasmPlaylist {
    fn from(playlist: &Playlist) -> Self {
        Self {
            name: playlist.name.clone(),
            tracks: playlist.tracks.iter().map(WasmTrack::from).collect(),
        }
    }
}

/// Everything a page needs to render the transport bar
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    state: PlayerState,
    now_playing: NowPlaying,
    controls: ControlAvailability,
    position_label: String,
    duration_label: String,
    progress: f64,
}

impl From<&Coordinator> for PlayerSnapshot {
    fn from(coordinator: &Coordinator) -> Self {
        let state = coordinator.state();
        Self {
            state,
            now_playing: NowPlaying::from_state(coordinator),
            controls: ControlAvailability::from_state(coordinator),
            position_label: format_time(state.position),
            duration_label: format_time(state.duration),
            progress: progress_percent(state.position, state.duration),
        }
    }
}
