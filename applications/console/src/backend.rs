//! Simulated audio element
//!
//! Behaves like a browser `<audio>` element without producing sound: it
//! queues the lifecycle notifications a real element would emit, which the
//! session feeds back into the player.

use groove_core::{AudioBackend, PlayTicket};
use groove_playback::AudioEvent;
use std::collections::VecDeque;
use std::path::Path;
use tracing::debug;

/// Notification produced by the simulated element
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Event(AudioEvent),
    Settled(PlayTicket, Result<(), String>),
}

#[derive(Debug)]
pub struct SimulatedBackend {
    track_secs: f64,
    source: Option<String>,
    playing: bool,
    position: f64,
    queue: VecDeque<Feedback>,
    released: usize,
}

impl SimulatedBackend {
    /// Element reporting `track_secs` as the duration of every source
    pub fn new(track_secs: f64) -> Self {
        Self {
            track_secs,
            source: None,
            playing: false,
            position: 0.0,
            queue: VecDeque::new(),
            released: 0,
        }
    }

    /// Advance playback by `secs`, ending the source if it runs out
    pub fn tick(&mut self, secs: f64) {
        if !self.playing || self.source.is_none() || !secs.is_finite() || secs <= 0.0 {
            return;
        }

        self.position = (self.position + secs).min(self.track_secs);
        self.emit(AudioEvent::TimeUpdated {
            position: self.position,
        });

        if self.position >= self.track_secs {
            self.playing = false;
            self.emit(AudioEvent::Paused);
            self.emit(AudioEvent::Ended);
        }
    }

    /// Play through to the end of the current source
    pub fn finish(&mut self) {
        self.tick(self.track_secs - self.position);
    }

    /// Take everything emitted so far
    pub fn drain(&mut self) -> Vec<Feedback> {
        self.queue.drain(..).collect()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Number of handles released so far
    pub fn released(&self) -> usize {
        self.released
    }

    fn emit(&mut self, event: AudioEvent) {
        self.queue.push_back(Feedback::Event(event));
    }

    fn stop(&mut self) {
        if self.playing {
            self.playing = false;
            self.emit(AudioEvent::Paused);
        }
    }
}

impl AudioBackend for SimulatedBackend {
    fn stage(&mut self, locator: &str) {
        // Loading a new source pauses the element first
        self.stop();
        self.source = Some(locator.to_string());
        self.position = 0.0;
        self.emit(AudioEvent::MetadataLoaded {
            duration: self.track_secs,
        });
        self.emit(AudioEvent::ReadyToPlay {
            duration: Some(self.track_secs),
        });
    }

    fn clear(&mut self) {
        self.stop();
        self.source = None;
        self.position = 0.0;
    }

    fn play(&mut self, ticket: PlayTicket) {
        let result = match &self.source {
            None => Err("NotSupportedError: no source".to_string()),
            Some(locator) if !Path::new(locator).is_file() => {
                Err(format!("NotSupportedError: cannot open {}", locator))
            }
            Some(_) => Ok(()),
        };

        if result.is_ok() && !self.playing {
            self.playing = true;
            self.emit(AudioEvent::Started);
        }
        self.queue.push_back(Feedback::Settled(ticket, result));
    }

    fn pause(&mut self) {
        self.stop();
    }

    fn seek(&mut self, position_secs: f64) {
        if self.source.is_none() {
            return;
        }
        self.position = position_secs.clamp(0.0, self.track_secs);
        self.emit(AudioEvent::TimeUpdated {
            position: self.position,
        });
    }

    fn release(&mut self, locator: &str) {
        debug!(locator, "Released source handle");
        self.released += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playable_file() -> tempfile::NamedTempFile {
        tempfile::NamedTempFile::new().unwrap()
    }

    #[test]
    fn staging_reports_metadata_and_readiness() {
        let mut backend = SimulatedBackend::new(90.0);
        backend.stage("/music/a.mp3");

        assert_eq!(
            backend.drain(),
            vec![
                Feedback::Event(AudioEvent::MetadataLoaded { duration: 90.0 }),
                Feedback::Event(AudioEvent::ReadyToPlay { duration: Some(90.0) }),
            ]
        );
    }

    #[test]
    fn play_without_a_readable_file_is_rejected() {
        let mut backend = SimulatedBackend::new(90.0);
        backend.play(PlayTicket::new(1));
        backend.stage("/definitely/not/here.mp3");
        backend.drain();
        backend.play(PlayTicket::new(2));

        assert!(!backend.is_playing());
        assert!(matches!(
            backend.drain().as_slice(),
            [Feedback::Settled(ticket, Err(_))] if *ticket == PlayTicket::new(2)
        ));
    }

    #[test]
    fn play_then_tick_to_the_end() {
        let file = playable_file();
        let mut backend = SimulatedBackend::new(10.0);
        backend.stage(file.path().to_str().unwrap());
        backend.drain();

        backend.play(PlayTicket::new(1));
        assert_eq!(
            backend.drain(),
            vec![
                Feedback::Event(AudioEvent::Started),
                Feedback::Settled(PlayTicket::new(1), Ok(())),
            ]
        );

        backend.tick(4.0);
        assert_eq!(backend.position(), 4.0);
        backend.finish();
        assert_eq!(
            backend.drain(),
            vec![
                Feedback::Event(AudioEvent::TimeUpdated { position: 4.0 }),
                Feedback::Event(AudioEvent::TimeUpdated { position: 10.0 }),
                Feedback::Event(AudioEvent::Paused),
                Feedback::Event(AudioEvent::Ended),
            ]
        );
        assert!(!backend.is_playing());
    }

    #[test]
    fn restaging_while_playing_pauses_first() {
        let file = playable_file();
        let path = file.path().to_str().unwrap().to_string();
        let mut backend = SimulatedBackend::new(10.0);
        backend.stage(&path);
        backend.play(PlayTicket::new(1));
        backend.drain();

        backend.stage(&path);
        assert_eq!(backend.drain()[0], Feedback::Event(AudioEvent::Paused));
    }
}
