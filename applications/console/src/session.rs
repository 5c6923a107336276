//! Interactive session
//!
//! Runs parsed commands against a [`Player`] over the simulated element and
//! renders the results as text.

use crate::{
    backend::{Feedback, SimulatedBackend},
    commands::{Command, HELP},
    config::ConsoleConfig,
};
use groove_core::{Confirm, KeyValueStore};
use groove_playback::{
    format_time, progress_percent, IncomingFile, Player, PlayerError, PlayerEvent, Result,
};
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, warn};

/// Upper bound on feedback rounds after one command
const MAX_FEEDBACK_ROUNDS: usize = 64;

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct Session<S> {
    player: Player<SimulatedBackend, S>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(config: &ConsoleConfig, store: S) -> Self {
        let backend = SimulatedBackend::new(config.simulated_track_secs);
        Self {
            player: Player::open(config.player.clone(), backend, store),
        }
    }

    pub fn player(&self) -> &Player<SimulatedBackend, S> {
        &self.player
    }

    /// Execute one command, then let the simulated element catch up
    pub fn execute(&mut self, command: Command, confirm: &mut dyn Confirm) -> Result<Outcome> {
        let mut out = String::new();
        let show_status = !matches!(command, Command::List | Command::Help | Command::Quit);

        match command {
            Command::List => self.render_list(&mut out),
            Command::Create(name) => self.player.create_playlist(&name)?,
            Command::Select(index) => self.player.select_playlist(index)?,
            Command::Rename(index, name) => self.player.rename_playlist(index, &name)?,
            Command::Delete(index) => self.player.delete_playlist(index, confirm)?,
            Command::Add(paths) => {
                let files = paths.iter().map(incoming_file).collect();
                self.player.add_files(files)?;
            }
            Command::Remove(index) => self.player.remove_track(index, confirm)?,
            Command::Play(index) => self.player.play_track(index)?,
            Command::Toggle => self.player.toggle_play_pause()?,
            Command::Next => self.player.next_track()?,
            Command::Previous => self.player.previous_track()?,
            Command::Seek(secs) => self.player.seek(secs)?,
            Command::Tick(secs) => self.player.backend_mut().tick(secs),
            Command::End => self.player.backend_mut().finish(),
            Command::Status => {}
            Command::Help => out.push_str(HELP),
            Command::Quit => return Ok(Outcome::Quit),
        }

        let notices = self.pump();
        for notice in notices {
            let _ = writeln!(out, "! {}", notice);
        }
        if show_status {
            self.render_status(&mut out);
        }

        Ok(Outcome::Continue(out.trim_end().to_string()))
    }

    /// Feed simulated element feedback into the player until it settles
    ///
    /// Returns messages worth showing to the user.
    pub fn pump(&mut self) -> Vec<String> {
        let mut notices = Vec::new();
        let mut settled = false;

        for _ in 0..MAX_FEEDBACK_ROUNDS {
            let feedback = self.player.backend_mut().drain();
            if feedback.is_empty() {
                settled = true;
                break;
            }
            for item in feedback {
                match item {
                    Feedback::Event(event) => self.player.handle_event(event),
                    Feedback::Settled(ticket, result) => self.player.play_settled(ticket, result),
                }
            }
        }

        if !settled {
            warn!("Simulated element did not settle after {} rounds", MAX_FEEDBACK_ROUNDS);
        }

        for event in self.player.drain_events() {
            match event {
                PlayerEvent::PlaybackFailed { message } => {
                    notices.push(format!("Playback failed: {}", message));
                }
                PlayerEvent::StorageRecovered { reason } => {
                    notices.push(format!(
                        "Saved playlists were unreadable and have been reset ({})",
                        reason
                    ));
                }
                other => debug!(?other, "Player event"),
            }
        }

        notices
    }

    fn render_list(&self, out: &mut String) {
        let state = self.player.state();

        let _ = writeln!(out, "Playlists:");
        for (i, playlist) in self.player.playlists().iter().enumerate() {
            let marker = if i == state.active_playlist { '*' } else { ' ' };
            let _ = writeln!(
                out,
                "{} {}. {} ({} tracks)",
                marker,
                i + 1,
                playlist.name,
                playlist.len()
            );
        }

        let Some(active) = self.player.coordinator().active_playlist() else {
            return;
        };
        let _ = writeln!(out, "\n{}:", active.name);
        if active.is_empty() {
            let _ = writeln!(out, "  (empty - use 'add <path>...')");
        }
        for (i, track) in active.tracks.iter().enumerate() {
            let marker = if i == state.active_track { '>' } else { ' ' };
            let missing = if track.is_playable() { "" } else { "  [re-add file to play]" };
            let _ = writeln!(
                out,
                "{} {}. {} - {}{}",
                marker,
                i + 1,
                track.artist,
                track.title,
                missing
            );
        }
    }

    fn render_status(&self, out: &mut String) {
        let state = self.player.state();
        let now = self.player.now_playing();
        let icon = if state.play_intent { "playing" } else { "paused" };
        let _ = writeln!(
            out,
            "[{}] {} - {}  {} / {} ({:.0}%)",
            icon,
            now.artist,
            now.title,
            format_time(state.position),
            format_time(state.duration),
            progress_percent(state.position, state.duration)
        );
    }
}

/// Describe a file on disk the way a browser file input would
pub fn incoming_file(path: impl AsRef<Path>) -> IncomingFile {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let locator = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    IncomingFile::new(
        name,
        mime.essence_str(),
        locator.to_string_lossy().into_owned(),
    )
}

/// Human-readable form of a failed command; `None` when it should stay silent
pub fn describe_error(error: &PlayerError) -> Option<String> {
    match error {
        e if e.is_user_notice() => Some(e.to_string()),
        PlayerError::ConfirmationDeclined => Some("Cancelled.".to_string()),
        PlayerError::Validation(_) => None,
        e => Some(format!("Error: {}", e)),
    }
}
