//! Playback/playlist coordinator - core state machine
//!
//! Owns the playlist collection, the active playlist/track indices, and the
//! play intent. Every operation validates, mutates state, and returns a
//! [`Transition`] describing what the native audio capability must do. The
//! coordinator itself never touches the platform.
//!
//! # Synchronization
//!
//! All operations funnel through [`Coordinator::sync`]: when the identity of
//! the active track or the play intent changed, the native capability is
//! reconciled (stage the source if needed, then play or pause; or force-stop
//! and clear when there is nothing playable).
//!
//! # Native authority
//!
//! `Started`/`Paused` events own the play intent. User operations only set it
//! optimistically; the latest outstanding native request decides whether an
//! incoming event is a confirmation or a stale echo.

use crate::{
    error::{Result, ValidationError},
    events::{AudioCommand, AudioEvent, PlayerEvent, Transition},
    metadata::{is_audio_mime, parse_file_name_with},
    sources::SourceRegistry,
    types::{IncomingFile, PlayerConfig, PlayerState},
};
use groove_core::{PlayTicket, Playlist, SourceKey, Track, TrackId};
use tracing::{debug, info, warn};

/// Latest request sent to the native capability that has not been confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NativeRequest {
    Play(PlayTicket),
    Pause,
}

/// Active track identity and intent, compared before/after an operation
#[derive(Debug, Clone, PartialEq, Eq)]
struct SyncSnapshot {
    track: Option<TrackId>,
    play_intent: bool,
}

/// Playlist and playback state machine
pub struct Coordinator {
    config: PlayerConfig,
    playlists: Vec<Playlist>,
    state: PlayerState,
    sources: SourceRegistry,

    // What the native capability currently holds, as far as we know
    staged: Option<SourceKey>,
    native_playing: bool,
    outstanding: Option<NativeRequest>,
    last_ticket: PlayTicket,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl Coordinator {
    /// Create a coordinator over restored playlists
    ///
    /// An empty collection gets one default playlist, so there is always an
    /// active playlist.
    pub fn new(config: PlayerConfig, mut playlists: Vec<Playlist>) -> Self {
        if playlists.is_empty() {
            playlists.push(Playlist::new(config.storage.default_playlist_name.clone()));
        }

        Self {
            config,
            playlists,
            state: PlayerState::default(),
            sources: SourceRegistry::new(),
            staged: None,
            native_playing: false,
            outstanding: None,
            last_ticket: PlayTicket::new(0),
            pending_events: Vec::new(),
        }
    }

    // ===== Playlist Management =====

    /// Append a new empty playlist and make it active
    pub fn create_playlist(&mut self, name: &str) -> Result<Transition> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let before = self.snapshot();
        let mut tx = Transition::none();

        self.playlists.push(Playlist::new(name));
        self.set_active_playlist(self.playlists.len() - 1);
        self.reset_player();
        self.sync(&before, &mut tx);
        self.mark_playlists_changed(&mut tx);

        info!(name, index = self.state.active_playlist, "Created playlist");
        Ok(tx)
    }

    /// Make the playlist at `index` active
    ///
    /// No-op when `index` is out of range or already active. The first track
    /// of the new playlist is staged but not started.
    pub fn select_playlist(&mut self, index: usize) -> Result<Transition> {
        if index >= self.playlists.len() || index == self.state.active_playlist {
            return Ok(Transition::none());
        }

        let before = self.snapshot();
        let mut tx = Transition::none();

        self.set_active_playlist(index);
        self.reset_player();
        self.sync(&before, &mut tx);

        debug!(index, "Selected playlist");
        Ok(tx)
    }

    /// Check that the playlist at `index` may be deleted
    pub fn validate_delete(&self, index: usize) -> Result<&Playlist> {
        if self.playlists.len() <= 1 {
            return Err(ValidationError::LastPlaylist.into());
        }
        self.playlists
            .get(index)
            .ok_or_else(|| ValidationError::PlaylistIndexOutOfRange(index).into())
    }

    /// Delete the playlist at `index`
    ///
    /// Confirmation is the caller's concern and must happen before this call.
    /// Deleting the active playlist activates playlist 0 with a full player
    /// reset; deleting another playlist only renumbers the active index.
    pub fn delete_playlist(&mut self, index: usize) -> Result<Transition> {
        self.validate_delete(index)?;

        let before = self.snapshot();
        let mut tx = Transition::none();

        let removed = self.playlists.remove(index);
        let active = self.state.active_playlist;

        if index == active {
            self.set_active_playlist(0);
            self.reset_player();
        } else if index < active {
            self.set_active_playlist(active - 1);
        }

        self.sync(&before, &mut tx);
        for track in &removed.tracks {
            self.release_source(track, &mut tx);
        }
        self.mark_playlists_changed(&mut tx);

        info!(name = %removed.name, index, "Deleted playlist");
        Ok(tx)
    }

    /// Rename the playlist at `index`
    pub fn rename_playlist(&mut self, index: usize, name: &str) -> Result<Transition> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let playlist = self
            .playlists
            .get_mut(index)
            .ok_or(ValidationError::PlaylistIndexOutOfRange(index))?;

        if playlist.name == name {
            return Ok(Transition::none());
        }
        playlist.name = name.to_string();

        let mut tx = Transition::none();
        self.mark_playlists_changed(&mut tx);
        Ok(tx)
    }

    // ===== Track Management =====

    /// Append audio files to the active playlist
    ///
    /// Non-audio files are dropped (their locators released). If the playlist
    /// was empty, its first track becomes active and is staged, not started.
    pub fn add_files(&mut self, files: Vec<IncomingFile>) -> Result<Transition> {
        if self.active_playlist().is_none() {
            return Err(ValidationError::NoActivePlaylist.into());
        }

        let mut tx = Transition::none();
        let mut accepted = Vec::new();

        for file in files {
            if !is_audio_mime(&file.mime_type) {
                debug!(name = %file.name, mime = %file.mime_type, "Dropping non-audio file");
                if let Some(locator) = file.locator {
                    tx.push(AudioCommand::Release { locator });
                }
                continue;
            }

            let meta = parse_file_name_with(&file.name, self.config.unknown_artist());
            let source = file.locator.map(|locator| self.sources.register(locator));
            accepted.push(Track::new(meta.title, meta.artist, source));
        }

        if accepted.is_empty() {
            return Ok(tx);
        }

        let before = self.snapshot();
        let count = accepted.len();
        let active = self.state.active_playlist;
        let playlist = &mut self.playlists[active];
        let was_empty = playlist.is_empty();
        playlist.tracks.extend(accepted);

        if was_empty {
            self.state.active_track = 0;
            self.sync(&before, &mut tx);
        }
        self.mark_playlists_changed(&mut tx);

        info!(count, playlist = active, "Added tracks");
        Ok(tx)
    }

    /// Check that `index` names a track in the active playlist
    pub fn validate_track(&self, index: usize) -> Result<&Track> {
        self.active_playlist()
            .and_then(|p| p.get(index))
            .ok_or_else(|| ValidationError::TrackIndexOutOfRange(index).into())
    }

    /// Remove the track at `index` from the active playlist
    ///
    /// Confirmation is the caller's concern and must happen before this call.
    /// No-op when the track does not exist.
    pub fn remove_track(&mut self, index: usize) -> Result<Transition> {
        if self.validate_track(index).is_err() {
            return Ok(Transition::none());
        }

        let before = self.snapshot();
        let mut tx = Transition::none();

        let active = self.state.active_playlist;
        let removed = self.playlists[active].tracks.remove(index);
        let remaining = self.playlists[active].len();
        let current = self.state.active_track;

        if remaining == 0 {
            self.reset_player();
        } else if index == current {
            // The track now occupying the slot takes over, stopped
            self.set_intent(false);
            self.state.position = 0.0;
            self.state.active_track = if index >= remaining { 0 } else { index };
        } else if index < current {
            self.state.active_track = current - 1;
        }

        self.sync(&before, &mut tx);
        self.release_source(&removed, &mut tx);
        self.mark_playlists_changed(&mut tx);

        debug!(index, title = %removed.title, "Removed track");
        Ok(tx)
    }

    // ===== Playback Control =====

    /// Play the track at `index`, or toggle if it is already active
    pub fn play_track(&mut self, index: usize) -> Result<Transition> {
        if self.validate_track(index).is_err() {
            return Ok(Transition::none());
        }
        if index == self.state.active_track {
            return self.toggle_play_pause();
        }

        let before = self.snapshot();
        let mut tx = Transition::none();

        self.state.active_track = index;
        self.set_intent(true);
        self.sync(&before, &mut tx);
        Ok(tx)
    }

    /// Flip the play intent of the active track
    ///
    /// No-op without an active, playable track.
    pub fn toggle_play_pause(&mut self) -> Result<Transition> {
        if !self.active_track().is_some_and(Track::is_playable) {
            return Ok(Transition::none());
        }

        let before = self.snapshot();
        let mut tx = Transition::none();

        self.set_intent(!self.state.play_intent);
        self.sync(&before, &mut tx);
        Ok(tx)
    }

    /// Advance to the next track (wrapping) and play
    pub fn next_track(&mut self) -> Result<Transition> {
        Ok(self.step(1))
    }

    /// Go back to the previous track (wrapping) and play
    pub fn previous_track(&mut self) -> Result<Transition> {
        Ok(self.step(-1))
    }

    /// Seek to `target` seconds
    ///
    /// No-op for non-finite or negative targets, or while nothing is staged
    /// or its duration is unknown. The position is reflected immediately.
    pub fn seek(&mut self, target: f64) -> Result<Transition> {
        if self.staged.is_none()
            || !target.is_finite()
            || target < 0.0
            || !has_duration(self.state.duration)
        {
            return Ok(Transition::none());
        }

        let mut tx = Transition::none();
        tx.push(AudioCommand::Seek { position: target });
        self.state.position = target;
        self.emit_position();
        Ok(tx)
    }

    /// Seek to a fraction (0.0 - 1.0, clamped) of the duration
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<Transition> {
        if !fraction.is_finite() {
            return Ok(Transition::none());
        }
        self.seek(fraction.clamp(0.0, 1.0) * self.state.duration)
    }

    // ===== Native Event Reflection =====

    /// Reflect a native lifecycle event
    pub fn handle_event(&mut self, event: AudioEvent) -> Transition {
        let mut tx = Transition::none();

        match event {
            AudioEvent::Started
            | AudioEvent::Ended
            | AudioEvent::MetadataLoaded { .. }
            | AudioEvent::ReadyToPlay { .. }
                if self.staged.is_none() =>
            {
                debug!("Ignoring native lifecycle event without a staged source");
            }
            AudioEvent::TimeUpdated { position } => {
                if position.is_finite() && position >= 0.0 {
                    self.state.position = position;
                    self.emit_position();
                }
            }
            AudioEvent::MetadataLoaded { duration } => {
                self.state.duration = if has_duration(duration) { duration } else { 0.0 };
                self.emit_position();
            }
            AudioEvent::ReadyToPlay { duration } => {
                // Play was requested before the source finished loading
                if self.state.play_intent && !self.native_playing {
                    self.request_play(&mut tx);
                }
                if let Some(duration) = duration.filter(|d| has_duration(*d)) {
                    if duration != self.state.duration {
                        self.state.duration = duration;
                        self.emit_position();
                    }
                }
            }
            AudioEvent::Started => {
                self.native_playing = true;
                match self.outstanding {
                    Some(NativeRequest::Pause) => {
                        debug!("Started echo while a pause is outstanding");
                        self.outstanding = None;
                    }
                    Some(NativeRequest::Play(_)) => {
                        self.outstanding = None;
                        self.set_intent(true);
                    }
                    None => self.set_intent(true),
                }
            }
            AudioEvent::Paused => {
                self.native_playing = false;
                match self.outstanding {
                    Some(NativeRequest::Play(ticket)) => {
                        debug!(%ticket, "Paused echo while a play is outstanding");
                    }
                    Some(NativeRequest::Pause) => {
                        self.outstanding = None;
                        self.set_intent(false);
                    }
                    None => self.set_intent(false),
                }
            }
            AudioEvent::Ended => {
                self.native_playing = false;
                self.outstanding = None;
                // The element stopped on its own; navigation restarts it
                self.state.play_intent = false;
                tx = self.step(1);
            }
            AudioEvent::Errored { message } => {
                self.native_playing = false;
                self.outstanding = None;
                self.fail_playback(message);
            }
        }

        tx
    }

    /// Reflect the completion of a native play request
    ///
    /// Completions for anything but the outstanding play ticket are stale and
    /// ignored, so a late failure never clobbers newer intent.
    pub fn play_settled(
        &mut self,
        ticket: PlayTicket,
        result: std::result::Result<(), String>,
    ) -> Transition {
        if self.outstanding != Some(NativeRequest::Play(ticket)) {
            debug!(%ticket, ok = result.is_ok(), "Ignoring stale play completion");
            return Transition::none();
        }

        self.outstanding = None;
        match result {
            Ok(()) => {
                self.native_playing = true;
                self.set_intent(true);
            }
            Err(message) => self.fail_playback(message),
        }
        Transition::none()
    }

    /// Record that stored playlists were discarded at startup
    pub fn note_storage_recovery(&mut self, reason: impl Into<String>) {
        self.pending_events.push(PlayerEvent::StorageRecovered {
            reason: reason.into(),
        });
    }

    // ===== State Queries =====

    /// All playlists
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Active playlist
    pub fn active_playlist(&self) -> Option<&Playlist> {
        self.playlists.get(self.state.active_playlist)
    }

    /// Index of the active playlist
    pub fn active_playlist_index(&self) -> usize {
        self.state.active_playlist
    }

    /// Active track, if the active playlist has any
    pub fn active_track(&self) -> Option<&Track> {
        self.active_playlist()
            .and_then(|p| p.get(self.state.active_track))
    }

    /// Index of the active track
    pub fn active_track_index(&self) -> usize {
        self.state.active_track
    }

    /// Snapshot of the player state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Current play intent
    pub fn is_playing(&self) -> bool {
        self.state.play_intent
    }

    /// Position in seconds
    pub fn position(&self) -> f64 {
        self.state.position
    }

    /// Duration in seconds (0 when unknown)
    pub fn duration(&self) -> f64 {
        self.state.duration
    }

    /// Locator currently staged on the native capability
    pub fn staged_locator(&self) -> Option<&str> {
        self.staged.and_then(|key| self.sources.locator(key))
    }

    /// Registered source handles
    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// Player configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Take all pending presentation events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether presentation events are waiting
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn step(&mut self, delta: isize) -> Transition {
        let count = self.active_playlist().map_or(0, Playlist::len);
        if count == 0 {
            return Transition::none();
        }

        let before = self.snapshot();
        let mut tx = Transition::none();

        let current = self.state.active_track % count;
        self.state.active_track = if delta >= 0 {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.set_intent(true);
        self.sync(&before, &mut tx);
        tx
    }

    fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            track: self.active_track().map(|t| t.id.clone()),
            play_intent: self.state.play_intent,
        }
    }

    /// The single synchronization point with the native capability
    fn sync(&mut self, before: &SyncSnapshot, tx: &mut Transition) {
        let after = self.snapshot();
        if after.track != before.track {
            self.pending_events.push(PlayerEvent::TrackChanged {
                track_id: after.track.clone(),
            });
        }
        if after != *before {
            self.reconcile(tx);
        }
    }

    fn reconcile(&mut self, tx: &mut Transition) {
        let playable = self
            .active_track()
            .and_then(|t| t.source)
            .filter(|key| self.sources.contains(*key));

        let Some(key) = playable else {
            tx.push(AudioCommand::Pause);
            tx.push(AudioCommand::Clear);
            self.staged = None;
            self.native_playing = false;
            self.outstanding = None;
            self.set_intent(false);
            self.state.position = 0.0;
            self.state.duration = 0.0;
            self.emit_position();
            return;
        };

        if self.staged != Some(key) {
            if let Some(locator) = self.sources.locator(key) {
                tx.push(AudioCommand::Stage {
                    locator: locator.to_string(),
                });
            }
            self.staged = Some(key);
            // A freshly loaded element is paused; any in-flight play is superseded below
            self.native_playing = false;
            self.state.position = 0.0;
            self.state.duration = 0.0;
            self.emit_position();
        }

        if self.state.play_intent {
            self.request_play(tx);
        } else {
            self.request_pause(tx);
        }
    }

    fn request_play(&mut self, tx: &mut Transition) {
        self.last_ticket = self.last_ticket.next();
        self.outstanding = Some(NativeRequest::Play(self.last_ticket));
        tx.push(AudioCommand::Play {
            ticket: self.last_ticket,
        });
    }

    fn request_pause(&mut self, tx: &mut Transition) {
        // Only expect a Paused echo if something is (or is about to be) playing
        let in_flight =
            self.native_playing || matches!(self.outstanding, Some(NativeRequest::Play(_)));
        self.outstanding = in_flight.then_some(NativeRequest::Pause);
        tx.push(AudioCommand::Pause);
    }

    fn fail_playback(&mut self, message: String) {
        warn!("Playback failed: {}", message);
        self.set_intent(false);
        self.pending_events
            .push(PlayerEvent::PlaybackFailed { message });
    }

    fn release_source(&mut self, track: &Track, tx: &mut Transition) {
        if let Some(key) = track.source {
            if self.staged == Some(key) {
                self.staged = None;
            }
            if let Some(locator) = self.sources.release(key) {
                tx.push(AudioCommand::Release { locator });
            }
        }
    }

    fn set_active_playlist(&mut self, index: usize) {
        if self.state.active_playlist != index {
            self.state.active_playlist = index;
            self.pending_events
                .push(PlayerEvent::ActivePlaylistChanged { index });
        }
    }

    fn reset_player(&mut self) {
        self.state.active_track = 0;
        self.set_intent(false);
        self.state.position = 0.0;
        self.state.duration = 0.0;
        self.emit_position();
    }

    fn set_intent(&mut self, playing: bool) {
        if self.state.play_intent != playing {
            self.state.play_intent = playing;
            self.pending_events
                .push(PlayerEvent::IntentChanged { playing });
        }
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlayerEvent::PositionChanged {
            position: self.state.position,
            duration: self.state.duration,
        });
    }

    fn mark_playlists_changed(&mut self, tx: &mut Transition) {
        tx.playlists_changed = true;
        self.pending_events.push(PlayerEvent::PlaylistsChanged);
    }
}

fn has_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}
