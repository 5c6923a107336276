//! `HTMLAudioElement` audio backend

use groove_core::{AudioBackend, PlayTicket};
use js_sys::Promise;
use std::{collections::VecDeque, rc::Rc};
use wasm_bindgen::{closure::Closure, JsValue};
use web_sys::{console, HtmlAudioElement, Url};

/// Persistent handler for `play()` promise settlements
pub type SettleHandler = Rc<Closure<dyn FnMut(JsValue)>>;

/// Audio backend over a single `<audio>` element
///
/// `play()` promises are settled through one pair of persistent handlers.
/// The element settles play promises in request order, so tickets are kept
/// in a FIFO and matched to settlements as they arrive.
pub struct ElementBackend {
    audio: HtmlAudioElement,
    pending: VecDeque<PlayTicket>,
    settle: Option<(SettleHandler, SettleHandler)>,
}

impl ElementBackend {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self {
            audio,
            pending: VecDeque::new(),
            settle: None,
        }
    }

    /// Install the handlers receiving `play()` settlements
    pub fn set_settle_handlers(&mut self, on_resolved: SettleHandler, on_rejected: SettleHandler) {
        self.settle = Some((on_resolved, on_rejected));
    }

    /// Ticket of the oldest unsettled play request
    pub fn next_settled(&mut self) -> Option<PlayTicket> {
        self.pending.pop_front()
    }
}

impl AudioBackend for ElementBackend {
    fn stage(&mut self, locator: &str) {
        self.audio.set_src(locator);
    }

    fn clear(&mut self) {
        // An empty `src` would raise an error event; drop the attribute instead
        if let Err(e) = self.audio.remove_attribute("src") {
            console::warn_2(&JsValue::from_str("Failed to clear audio source:"), &e);
        }
        self.audio.load();
    }

    fn play(&mut self, ticket: PlayTicket) {
        let promise = self
            .audio
            .play()
            .unwrap_or_else(|e| Promise::reject(&e));

        self.pending.push_back(ticket);
        if let Some((on_resolved, on_rejected)) = &self.settle {
            let _ = promise.then2(on_resolved, on_rejected);
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            console::warn_2(&JsValue::from_str("Failed to pause audio:"), &e);
        }
    }

    fn seek(&mut self, position_secs: f64) {
        self.audio.set_current_time(position_secs);
    }

    fn release(&mut self, locator: &str) {
        if let Err(e) = Url::revoke_object_url(locator) {
            console::warn_2(&JsValue::from_str("Failed to revoke object URL:"), &e);
        }
    }
}
