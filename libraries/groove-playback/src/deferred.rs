//! Re-entrancy-safe cell for callback-driven hosts
//!
//! In the browser, native callbacks can fire while the player is borrowed
//! (a modal `window.confirm` spins a nested event loop). Notifications that
//! arrive during a borrow are queued and replayed, in arrival order, before
//! that borrow ends.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;

pub(crate) struct DeferredCell<T, D> {
    value: RefCell<T>,
    deferred: RefCell<VecDeque<D>>,
}

impl<T, D> DeferredCell<T, D> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            deferred: RefCell::new(VecDeque::new()),
        }
    }

    /// Run `op` unless the value is already borrowed
    ///
    /// Notifications deferred while `op` ran are replayed before returning.
    pub(crate) fn with<R>(
        &self,
        op: impl FnOnce(&mut T) -> R,
        mut replay: impl FnMut(&mut T, D),
    ) -> Option<R> {
        let mut value = self.value.try_borrow_mut().ok()?;
        let out = op(&mut value);
        self.replay_deferred(&mut value, &mut replay);
        Some(out)
    }

    /// Apply `item` now, or queue it until the current borrow ends
    ///
    /// Returns whether the item was applied immediately.
    pub(crate) fn deliver(&self, item: D, mut replay: impl FnMut(&mut T, D)) -> bool {
        let Ok(mut value) = self.value.try_borrow_mut() else {
            self.deferred.borrow_mut().push_back(item);
            return false;
        };
        replay(&mut value, item);
        self.replay_deferred(&mut value, &mut replay);
        true
    }

    /// Shared view, `None` while borrowed mutably
    pub(crate) fn try_borrow(&self) -> Option<Ref<'_, T>> {
        self.value.try_borrow().ok()
    }

    fn replay_deferred(&self, value: &mut T, replay: &mut impl FnMut(&mut T, D)) {
        // Pop one at a time: replaying may trigger further deliveries
        loop {
            let next = self.deferred.borrow_mut().pop_front();
            match next {
                Some(item) => replay(value, item),
                None => break,
            }
        }
    }
}
