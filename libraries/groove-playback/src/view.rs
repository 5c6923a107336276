//! Presentation helpers
//!
//! Small, pure projections of coordinator state that every front end needs:
//! time labels, progress bar fill, the now-playing header, and which
//! transport buttons are usable.

use crate::coordinator::Coordinator;
use serde::Serialize;

/// Format seconds as `M:SS`
///
/// Unknown or negative values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Progress bar fill in percent (0 - 100)
pub fn progress_percent(position: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    (position / duration * 100.0).clamp(0.0, 100.0)
}

/// Now-playing header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
}

impl NowPlaying {
    /// Header for the coordinator's current selection
    pub fn from_state(coordinator: &Coordinator) -> Self {
        if let Some(track) = coordinator.active_track() {
            return Self {
                title: track.title.clone(),
                artist: track.artist.clone(),
            };
        }

        let title = if coordinator.active_playlist().is_some_and(|p| p.is_empty()) {
            "Playlist Empty"
        } else {
            "Select or Add a Song"
        };

        Self {
            title: title.to_string(),
            artist: "-".to_string(),
        }
    }
}

/// Which transport controls are usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ControlAvailability {
    pub play_pause: bool,
    pub previous: bool,
    pub next: bool,
    pub seek: bool,
}

impl ControlAvailability {
    pub fn from_state(coordinator: &Coordinator) -> Self {
        let playable = coordinator
            .active_track()
            .is_some_and(groove_core::Track::is_playable);
        let navigable = coordinator.active_playlist().map_or(0, |p| p.len()) >= 2;

        Self {
            play_pause: playable,
            previous: navigable,
            next: navigable,
            seek: playable && coordinator.duration() > 0.0,
        }
    }
}
