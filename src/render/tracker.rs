//! Last-rendered state bookkeeping for one component instance.

use std::fmt;
use std::rc::Rc;

/// Records the state a view was last written with.
///
/// States are compared by identity (`Rc::ptr_eq`), never by value. A state
/// handed to the tracker must not be mutated in place afterwards: the tracker
/// has no way to notice, and the view would silently go stale.
pub struct RenderTracker<S> {
    last_rendered: Option<Rc<S>>,
}

impl<S> RenderTracker<S> {
    pub fn new() -> Self {
        Self {
            last_rendered: None,
        }
    }

    /// True once any state has been recorded.
    pub fn is_mounted(&self) -> bool {
        self.last_rendered.is_some()
    }

    pub fn last_rendered(&self) -> Option<&Rc<S>> {
        self.last_rendered.as_ref()
    }

    /// Run the mount writer unconditionally, then record `state`.
    pub fn mount<V, H, F>(&mut self, mount: F, view: &mut V, state: &Rc<S>, handle: &H)
    where
        F: FnOnce(&mut V, &S, &H),
    {
        mount(view, state, handle);
        self.last_rendered = Some(Rc::clone(state));
    }

    /// Run the update writer if `state` is not the one last recorded, then
    /// record it either way.
    ///
    /// Returns whether the writer ran. Without a prior record there is no
    /// previous state to hand over, so nothing is written.
    pub fn update<V, H, F>(&mut self, update: F, view: &mut V, state: &Rc<S>, handle: &H) -> bool
    where
        F: FnOnce(&mut V, &S, &S, &H),
    {
        let wrote = match self.last_rendered.take() {
            Some(prev) if !Rc::ptr_eq(&prev, state) => {
                update(view, &prev, state, handle);
                true
            }
            _ => false,
        };
        self.last_rendered = Some(Rc::clone(state));
        wrote
    }
}

impl<S> Default for RenderTracker<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for RenderTracker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTracker")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
