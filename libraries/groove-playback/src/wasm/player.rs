//! WASM-compatible Player wrapper

use super::{
    backend::{ElementBackend, SettleHandler},
    types::{PlayerSnapshot, WasmPlaylist},
};
use crate::{
    deferred::DeferredCell, is_audio_mime, AudioEvent, IncomingFile, Player, PlayerConfig,
    PlayerError, PlayerEvent, ValidationError,
};
use groove_core::{Confirm, ConfirmPrompt};
use groove_storage::LocalStorageStore;
use js_sys::Function;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{console, Event, FileList, HtmlAudioElement, Url};

type WebPlayer = Player<ElementBackend, LocalStorageStore>;
type Listener = Closure<dyn FnMut(Event)>;

/// Native notification, applied immediately or once the player is free
enum NativeFeedback {
    Event(AudioEvent),
    Settled(Result<(), String>),
}

/// State shared between the bindings and the element's event listeners
struct Shared {
    player: DeferredCell<WebPlayer, NativeFeedback>,
    on_change: RefCell<Option<Function>>,
    on_error: RefCell<Option<Function>>,
}

impl Shared {
    /// Run `op` against the player, then publish the events it produced
    ///
    /// Returns `None` if the player is already borrowed (a callback re-entered
    /// the bindings synchronously).
    fn dispatch<T>(&self, op: impl FnOnce(&mut WebPlayer) -> T) -> Option<T> {
        let Some(out) = self.player.with(op, Self::replay) else {
            console::error_1(&JsValue::from_str("Groove player is busy; call ignored"));
            return None;
        };
        self.flush();
        Some(out)
    }

    /// Hand native feedback to the player, deferring it while the player is busy
    fn notify(&self, feedback: NativeFeedback) {
        if self.player.deliver(feedback, Self::replay) {
            self.flush();
        }
    }

    fn replay(player: &mut WebPlayer, feedback: NativeFeedback) {
        match feedback {
            NativeFeedback::Event(event) => player.handle_event(event),
            // The ticket is taken when the settlement is applied, keeping the FIFO aligned
            NativeFeedback::Settled(result) => {
                if let Some(ticket) = player.backend_mut().next_settled() {
                    player.play_settled(ticket, result);
                }
            }
        }
    }

    fn flush(&self) {
        let events = self
            .player
            .with(WebPlayer::drain_events, Self::replay)
            .unwrap_or_default();
        self.publish(&events);
    }

    fn publish(&self, events: &[PlayerEvent]) {
        if events.is_empty() {
            return;
        }

        for event in events {
            match event {
                PlayerEvent::PlaybackFailed { message } => {
                    self.report(&format!("Playback failed: {}", message));
                }
                PlayerEvent::StorageRecovered { reason } => {
                    self.report(&format!("Saved playlists were unreadable and have been reset: {}", reason));
                }
                _ => {}
            }
        }

        let callback = self.on_change.borrow().clone();
        if let Some(cb) = callback {
            match serde_wasm_bindgen::to_value(events) {
                Ok(js_events) => {
                    cb.call1(&JsValue::NULL, &js_events).ok();
                }
                Err(e) => console::error_1(&JsValue::from_str(&format!(
                    "Failed to serialize player events: {}",
                    e
                ))),
            }
        }
    }

    fn report(&self, message: &str) {
        console::error_1(&JsValue::from_str(message));
        let callback = self.on_error.borrow().clone();
        if let Some(cb) = callback {
            cb.call1(&JsValue::NULL, &JsValue::from_str(message)).ok();
        }
    }

    /// Map an operation result onto the JavaScript surface
    ///
    /// Declined confirmations and empty names are silent no-ops; user notices
    /// and failures are reported and returned as strings.
    fn settle_result(&self, result: crate::Result<()>) -> Result<(), JsValue> {
        match result {
            Ok(()) => Ok(()),
            Err(PlayerError::ConfirmationDeclined)
            | Err(PlayerError::Validation(ValidationError::EmptyName)) => Ok(()),
            Err(e) => {
                let message = e.to_string();
                self.report(&message);
                Err(JsValue::from_str(&message))
            }
        }
    }
}

/// `window.confirm` dialog
struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(&prompt.message()).ok())
            .unwrap_or(false)
    }
}

/// Browser music player bound to an `<audio>` element
#[wasm_bindgen]
pub struct WasmPlayer {
    shared: Rc<Shared>,
    audio: HtmlAudioElement,
    listeners: Vec<(&'static str, Listener)>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Restore playlists from `localStorage` and subscribe to `audio`
    #[wasm_bindgen(constructor)]
    pub fn new(audio: HtmlAudioElement) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let store = LocalStorageStore::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let player = Player::open(
            PlayerConfig::default(),
            ElementBackend::new(audio.clone()),
            store,
        );

        let shared = Rc::new(Shared {
            player: DeferredCell::new(player),
            on_change: RefCell::new(None),
            on_error: RefCell::new(None),
        });

        let (on_resolved, on_rejected) = settle_handlers(&shared);
        shared.player.with(
            |p| p.backend_mut().set_settle_handlers(on_resolved, on_rejected),
            Shared::replay,
        );

        let mut this = Self {
            shared,
            audio,
            listeners: Vec::new(),
        };

        this.listen("timeupdate", |audio| AudioEvent::TimeUpdated {
            position: audio.current_time(),
        })?;
        this.listen("loadedmetadata", |audio| AudioEvent::MetadataLoaded {
            duration: audio.duration(),
        })?;
        this.listen("canplay", |audio| AudioEvent::ReadyToPlay {
            duration: Some(audio.duration()),
        })?;
        this.listen("play", |_| AudioEvent::Started)?;
        this.listen("pause", |_| AudioEvent::Paused)?;
        this.listen("ended", |_| AudioEvent::Ended)?;
        this.listen("error", |audio| AudioEvent::Errored {
            message: audio
                .error()
                .map(|e| {
                    let message = e.message();
                    if message.is_empty() {
                        format!("Media error code {}", e.code())
                    } else {
                        message
                    }
                })
                .unwrap_or_else(|| "Unknown media error".to_string()),
        })?;

        Ok(this)
    }

    // ===== Playlist Management =====

    #[wasm_bindgen(js_name = createPlaylist)]
    pub fn create_playlist(&self, name: &str) -> Result<(), JsValue> {
        self.run(|p| p.create_playlist(name))
    }

    #[wasm_bindgen(js_name = selectPlaylist)]
    pub fn select_playlist(&self, index: usize) -> Result<(), JsValue> {
        self.run(|p| p.select_playlist(index))
    }

    #[wasm_bindgen(js_name = renamePlaylist)]
    pub fn rename_playlist(&self, index: usize, name: &str) -> Result<(), JsValue> {
        self.run(|p| p.rename_playlist(index, name))
    }

    /// Delete a playlist after `window.confirm`
    #[wasm_bindgen(js_name = deletePlaylist)]
    pub fn delete_playlist(&self, index: usize) -> Result<(), JsValue> {
        self.run(|p| p.delete_playlist(index, &mut WindowConfirm))
    }

    // ===== Track Management =====

    /// Add the audio files of a file input or drop
    ///
    /// Object URLs are only created for audio files.
    #[wasm_bindgen(js_name = addFiles)]
    pub fn add_files(&self, files: &FileList) -> Result<(), JsValue> {
        self.run(|p| {
            if p.coordinator().active_playlist().is_none() {
                return Err(ValidationError::NoActivePlaylist.into());
            }

            let mut incoming = Vec::new();
            for file in (0..files.length()).filter_map(|i| files.get(i)) {
                let mime_type = file.type_();
                if !is_audio_mime(&mime_type) {
                    continue;
                }
                match Url::create_object_url_with_blob(&file) {
                    Ok(locator) => incoming.push(IncomingFile::new(file.name(), mime_type, locator)),
                    Err(e) => console::warn_2(
                        &JsValue::from_str(&format!("Skipping {}: no object URL", file.name())),
                        &e,
                    ),
                }
            }

            p.add_files(incoming)
        })
    }

    /// Remove a track after `window.confirm`
    #[wasm_bindgen(js_name = removeTrack)]
    pub fn remove_track(&self, index: usize) -> Result<(), JsValue> {
        self.run(|p| p.remove_track(index, &mut WindowConfirm))
    }

    // ===== Playback Control =====

    #[wasm_bindgen(js_name = playTrack)]
    pub fn play_track(&self, index: usize) -> Result<(), JsValue> {
        self.run(|p| p.play_track(index))
    }

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) -> Result<(), JsValue> {
        self.run(WebPlayer::toggle_play_pause)
    }

    #[wasm_bindgen(js_name = nextTrack)]
    pub fn next_track(&self) -> Result<(), JsValue> {
        self.run(WebPlayer::next_track)
    }

    #[wasm_bindgen(js_name = previousTrack)]
    pub fn previous_track(&self) -> Result<(), JsValue> {
        self.run(WebPlayer::previous_track)
    }

    /// Seek to position in seconds
    pub fn seek(&self, position_secs: f64) -> Result<(), JsValue> {
        self.run(|p| p.seek(position_secs))
    }

    /// Seek by fraction of the duration (0.0 - 1.0)
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&self, fraction: f64) -> Result<(), JsValue> {
        self.run(|p| p.seek_to_fraction(fraction))
    }

    // ===== State Queries =====

    /// All playlists as `[{ name, tracks: [{ id, title, artist, playable }] }]`
    #[wasm_bindgen(js_name = getPlaylists)]
    pub fn get_playlists(&self) -> JsValue {
        let Some(player) = self.shared.player.try_borrow() else {
            return JsValue::NULL;
        };
        let playlists: Vec<WasmPlaylist> = player.playlists().iter().map(WasmPlaylist::from).collect();
        serde_wasm_bindgen::to_value(&playlists).unwrap_or(JsValue::NULL)
    }

    /// Indices, intent, timing labels, header and control availability
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> JsValue {
        let Some(player) = self.shared.player.try_borrow() else {
            return JsValue::NULL;
        };
        let snapshot = PlayerSnapshot::from(player.coordinator());
        serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.shared
            .player
            .try_borrow()
            .is_some_and(|p| p.state().play_intent)
    }

    // ===== Event Listeners =====

    /// Register change callback, called with the array of player events
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Function) {
        *self.shared.on_change.borrow_mut() = Some(callback);
    }

    /// Register error callback, called with a message string
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&self, callback: Function) {
        *self.shared.on_error.borrow_mut() = Some(callback);
    }
}

impl WasmPlayer {
    fn run(&self, op: impl FnOnce(&mut WebPlayer) -> crate::Result<()>) -> Result<(), JsValue> {
        match self.shared.dispatch(op) {
            Some(result) => self.shared.settle_result(result),
            None => Err(JsValue::from_str("Player is busy")),
        }
    }

    fn listen(
        &mut self,
        name: &'static str,
        to_event: fn(&HtmlAudioElement) -> AudioEvent,
    ) -> Result<(), JsValue> {
        let shared = Rc::downgrade(&self.shared);
        let audio = self.audio.clone();
        let listener = Listener::new(move |_event: Event| {
            if let Some(shared) = shared.upgrade() {
                let event = to_event(&audio);
                shared.notify(NativeFeedback::Event(event));
            }
        });

        self.audio
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        self.listeners.push((name, listener));
        Ok(())
    }
}

impl Drop for WasmPlayer {
    fn drop(&mut self) {
        for (name, listener) in &self.listeners {
            let _ = self
                .audio
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
    }
}

fn settle_handlers(shared: &Rc<Shared>) -> (SettleHandler, SettleHandler) {
    let weak = Rc::downgrade(shared);
    let on_resolved = Closure::<dyn FnMut(JsValue)>::new(move |_value: JsValue| {
        if let Some(shared) = weak.upgrade() {
            shared.notify(NativeFeedback::Settled(Ok(())));
        }
    });

    let weak = Rc::downgrade(shared);
    let on_rejected = Closure::<dyn FnMut(JsValue)>::new(move |reason: JsValue| {
        if let Some(shared) = weak.upgrade() {
            shared.notify(NativeFeedback::Settled(Err(describe_rejection(&reason))));
        }
    });

    (Rc::new(on_resolved), Rc::new(on_rejected))
}

fn describe_rejection(reason: &JsValue) -> String {
    reason
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| reason.as_string())
        .unwrap_or_else(|| "Playback was rejected".to_string())
}

/// Format seconds as `M:SS`
#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(seconds: f64) -> String {
    crate::format_time(seconds)
}
