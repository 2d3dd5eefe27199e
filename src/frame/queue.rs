//! Deterministic frame scheduler driven by explicit steps.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;

use super::scheduler::{FrameCallback, FrameScheduler, FrameToken};

/// Queue of frame callbacks that fire only when [`QueuedFrames::step`] is called.
///
/// Used directly by tests, and by [`crate::frame::driver::run_frames`] as the
/// backing store of a real paint loop.
pub struct QueuedFrames {
    queue: RefCell<BTreeMap<FrameToken, FrameCallback>>,
    next_token: Cell<u64>,
    fired: Cell<u64>,
}

impl QueuedFrames {
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(BTreeMap::new()),
            next_token: Cell::new(0),
            fired: Cell::new(0),
        }
    }

    /// Paint one frame: run every callback queued before this call, in
    /// scheduling order. Callbacks scheduled while stepping wait for the next
    /// step; callbacks cancelled while stepping never run.
    pub fn step(&self) -> usize {
        let boundary = FrameToken::new(self.next_token.get());
        let mut ran = 0;
        loop {
            let callback = {
                let mut queue = self.queue.borrow_mut();
                match queue.keys().next().copied() {
                    Some(token) if token < boundary => queue.remove(&token),
                    _ => None,
                }
            };
            let Some(callback) = callback else {
                break;
            };
            callback();
            ran += 1;
        }
        self.fired.set(self.fired.get() + ran as u64);
        ran
    }

    /// Callbacks waiting for the next step.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Total callbacks fired since creation.
    pub fn frames_fired(&self) -> u64 {
        self.fired.get()
    }
}

impl Default for QueuedFrames {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for QueuedFrames {
    fn schedule_frame(&self, callback: FrameCallback) -> FrameToken {
        let token = FrameToken::new(self.next_token.get());
        self.next_token.set(token.raw() + 1);
        self.queue.borrow_mut().insert(token, callback);
        token
    }

    fn cancel_frame(&self, token: FrameToken) {
        self.queue.borrow_mut().remove(&token);
    }
}

impl fmt::Debug for QueuedFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedFrames")
            .field("pending", &self.pending())
            .field("fired", &self.fired.get())
            .finish()
    }
}
