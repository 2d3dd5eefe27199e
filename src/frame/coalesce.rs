//! Per-instance render request coalescing.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::scheduler::{FrameScheduler, FrameToken};

/// Keeps at most one frame callback pending for one instance.
///
/// A new request cancels and replaces the pending one. The state captured by
/// a replaced request is dropped without ever reaching the writer.
pub struct FrameCoalescer {
    scheduler: Rc<dyn FrameScheduler>,
    pending: Rc<Cell<Option<FrameToken>>>,
    /// Bumped on every request and cancel; a callback only writes if it still
    /// belongs to the current generation.
    generation: Rc<Cell<u64>>,
}

impl FrameCoalescer {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(None)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Request that `write(state)` runs on the next frame.
    pub fn schedule_render<S, F>(&self, state: Rc<S>, write: F) -> FrameToken
    where
        S: 'static,
        F: FnOnce(Rc<S>) + 'static,
    {
        self.cancel_pending();

        let generation = self.generation.get();
        let current = Rc::clone(&self.generation);
        let pending = Rc::clone(&self.pending);
        let token = self.scheduler.schedule_frame(Box::new(move || {
            if current.get() != generation {
                tracing::trace!("stale frame callback ignored");
                return;
            }
            pending.set(None);
            write(state);
        }));
        self.pending.set(Some(token));
        token
    }

    /// Drop the pending request, if any.
    pub fn cancel(&self) {
        self.cancel_pending();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn pending_token(&self) -> Option<FrameToken> {
        self.pending.get()
    }

    fn cancel_pending(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
            tracing::trace!(%token, "pending frame replaced");
        }
    }
}

impl fmt::Debug for FrameCoalescer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameCoalescer")
            .field("pending", &self.pending.get())
            .finish()
    }
}
