//! Player driver
//!
//! Glues the [`Coordinator`] to real capabilities: applies each transition's
//! commands to an [`AudioBackend`], persists the playlist collection through a
//! [`PlaylistRepository`] whenever it changes, and asks a [`Confirm`] before
//! destructive operations.

use crate::{
    coordinator::Coordinator,
    error::{PlayerError, Result},
    events::{AudioCommand, AudioEvent, PlayerEvent, Transition},
    types::{IncomingFile, PlayerConfig, PlayerState},
    view::{ControlAvailability, NowPlaying},
};
use groove_core::{AudioBackend, Confirm, ConfirmPrompt, KeyValueStore, PlayTicket, Playlist};
use groove_storage::{PlaylistRepository, Recovery};
use tracing::{debug, error, info};

/// Playlist player over an audio backend and a key-value store
pub struct Player<A, S> {
    coordinator: Coordinator,
    backend: A,
    repository: PlaylistRepository<S>,
}

impl<A: AudioBackend, S: KeyValueStore> Player<A, S> {
    /// Restore playlists from `store` and start with the first playlist active
    ///
    /// Never fails: unusable stored data is discarded and reported once as
    /// [`PlayerEvent::StorageRecovered`].
    pub fn open(config: PlayerConfig, backend: A, store: S) -> Self {
        let mut repository = PlaylistRepository::new(store, config.storage.clone());
        let restored = repository.load();
        let recovery = restored.recovery.clone();

        let mut coordinator = Coordinator::new(config, restored.playlists);
        if let Recovery::Corrupted(reason) = recovery {
            coordinator.note_storage_recovery(reason);
        }

        info!(
            playlists = coordinator.playlists().len(),
            "Player ready"
        );

        Self {
            coordinator,
            backend,
            repository,
        }
    }

    // ===== Playlist Management =====

    /// Create an empty playlist and switch to it
    pub fn create_playlist(&mut self, name: &str) -> Result<()> {
        let tx = self.coordinator.create_playlist(name)?;
        self.apply(tx);
        Ok(())
    }

    /// Switch to the playlist at `index`, staging its first track
    pub fn select_playlist(&mut self, index: usize) -> Result<()> {
        let tx = self.coordinator.select_playlist(index)?;
        self.apply(tx);
        Ok(())
    }

    /// Rename the playlist at `index`
    pub fn rename_playlist(&mut self, index: usize, name: &str) -> Result<()> {
        let tx = self.coordinator.rename_playlist(index, name)?;
        self.apply(tx);
        Ok(())
    }

    /// Delete a playlist after confirmation
    ///
    /// Validation runs before the prompt, so the user is never asked about a
    /// deletion that cannot happen.
    pub fn delete_playlist(&mut self, index: usize, confirm: &mut dyn Confirm) -> Result<()> {
        let prompt = ConfirmPrompt::DeletePlaylist {
            name: self.coordinator.validate_delete(index)?.name.clone(),
        };
        if !confirm.confirm(&prompt) {
            debug!(index, "Playlist deletion declined");
            return Err(PlayerError::ConfirmationDeclined);
        }

        let tx = self.coordinator.delete_playlist(index)?;
        self.apply(tx);
        Ok(())
    }

    // ===== Track Management =====

    /// Append the audio files among `files` to the active playlist
    pub fn add_files(&mut self, files: Vec<IncomingFile>) -> Result<()> {
        let tx = self.coordinator.add_files(files)?;
        self.apply(tx);
        Ok(())
    }

    /// Remove a track of the active playlist after confirmation
    ///
    /// A nonexistent index is a no-op and prompts nothing.
    pub fn remove_track(&mut self, index: usize, confirm: &mut dyn Confirm) -> Result<()> {
        let Ok(track) = self.coordinator.validate_track(index) else {
            return Ok(());
        };
        let prompt = ConfirmPrompt::RemoveTrack {
            title: track.title.clone(),
        };
        if !confirm.confirm(&prompt) {
            debug!(index, "Track removal declined");
            return Err(PlayerError::ConfirmationDeclined);
        }

        let tx = self.coordinator.remove_track(index)?;
        self.apply(tx);
        Ok(())
    }

    // ===== Playback Control =====

    /// Play the track at `index`, or toggle it if already active
    pub fn play_track(&mut self, index: usize) -> Result<()> {
        let tx = self.coordinator.play_track(index)?;
        self.apply(tx);
        Ok(())
    }

    /// Play or pause the active track
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        let tx = self.coordinator.toggle_play_pause()?;
        self.apply(tx);
        Ok(())
    }

    /// Skip to the next track (wrapping) and play
    pub fn next_track(&mut self) -> Result<()> {
        let tx = self.coordinator.next_track()?;
        self.apply(tx);
        Ok(())
    }

    /// Go back to the previous track (wrapping) and play
    pub fn previous_track(&mut self) -> Result<()> {
        let tx = self.coordinator.previous_track()?;
        self.apply(tx);
        Ok(())
    }

    /// Seek the active track to `position` seconds
    pub fn seek(&mut self, position: f64) -> Result<()> {
        let tx = self.coordinator.seek(position)?;
        self.apply(tx);
        Ok(())
    }

    /// Seek to a fraction (0.0 - 1.0) of the active track
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        let tx = self.coordinator.seek_to_fraction(fraction)?;
        self.apply(tx);
        Ok(())
    }

    // ===== Native Feedback =====

    /// Feed a native lifecycle event back into the player
    pub fn handle_event(&mut self, event: AudioEvent) {
        let tx = self.coordinator.handle_event(event);
        self.apply(tx);
    }

    /// Feed the completion of a native play request back into the player
    pub fn play_settled(&mut self, ticket: PlayTicket, result: std::result::Result<(), String>) {
        let tx = self.coordinator.play_settled(ticket, result);
        self.apply(tx);
    }

    // ===== Persistence =====

    /// Write the playlist collection to the store now
    pub fn save(&mut self) -> Result<()> {
        self.repository.save(self.coordinator.playlists())?;
        Ok(())
    }

    // ===== State Queries =====

    /// Underlying state machine
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn playlists(&self) -> &[Playlist] {
        self.coordinator.playlists()
    }

    pub fn state(&self) -> PlayerState {
        self.coordinator.state()
    }

    /// Header text for the active track
    pub fn now_playing(&self) -> NowPlaying {
        NowPlaying::from_state(&self.coordinator)
    }

    /// Which transport controls are usable
    pub fn controls(&self) -> ControlAvailability {
        ControlAvailability::from_state(&self.coordinator)
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut A {
        &mut self.backend
    }

    /// Take all pending presentation events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.coordinator.drain_events()
    }

    // ===== Internal =====

    fn apply(&mut self, tx: Transition) {
        for command in tx.commands {
            match command {
                AudioCommand::Stage { locator } => self.backend.stage(&locator),
                AudioCommand::Clear => self.backend.clear(),
                AudioCommand::Play { ticket } => self.backend.play(ticket),
                AudioCommand::Pause => self.backend.pause(),
                AudioCommand::Seek { position } => self.backend.seek(position),
                AudioCommand::Release { locator } => self.backend.release(&locator),
            }
        }

        if tx.playlists_changed {
            if let Err(e) = self.save() {
                error!("Failed to save playlists: {}", e);
            }
        }
    }
}
