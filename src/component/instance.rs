//! Per-instance state machine: message loop, render requests, effect tasks.

use std::cell::{Cell, Ref, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::AbortHandle;

use super::effect::{Effect, EffectError};
use super::handle::{Dispatch, Handle};
use super::host::HostElement;
use super::traits::{Component, ComponentWriter};
use crate::frame::{FrameCoalescer, FrameScheduler};
use crate::render::{self, RenderTracker};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a component instance, used in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an instance is in its message loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// `init` has run; the first (synchronous) mount is in progress.
    Initialized,
    /// Waiting for messages.
    Idle,
    /// Processing a message or writing the view. New messages are queued.
    Updating,
    /// Pending frame and effects cancelled; messages are dropped.
    TornDown,
}

/// A live component: owns its state, view, render record and effect tasks.
///
/// Instances are single-threaded. Effects are spawned with
/// [`tokio::task::spawn_local`], so an instance whose component returns
/// effects must be driven inside a [`tokio::task::LocalSet`].
///
/// Dropping the instance tears it down.
pub struct ComponentInstance<C: Component> {
    inner: Rc<Inner<C>>,
}

struct Inner<C: Component> {
    id: InstanceId,
    this: Weak<Inner<C>>,
    component: C,
    host: RefCell<HostElement>,
    view: RefCell<C::View>,
    state: RefCell<Rc<C::State>>,
    phase: Cell<Phase>,
    mailbox: RefCell<VecDeque<C::Message>>,
    tracker: RefCell<RenderTracker<C::State>>,
    frames: FrameCoalescer,
    effects: RefCell<HashMap<u64, AbortHandle>>,
    next_effect: Cell<u64>,
    handle: Handle<C::Message>,
}

impl<C: Component> ComponentInstance<C> {
    /// Run `init`, then write the first state synchronously through the mount
    /// path, then start the init effect if one was returned.
    pub fn new(
        component: C,
        host: HostElement,
        view: C::View,
        frames: Rc<dyn FrameScheduler>,
    ) -> Self {
        let id = InstanceId::next();
        let (state, effect) = component.init(&host);
        tracing::debug!(instance = %id, tag = host.tag(), "component initialized");

        let inner = Rc::new_cyclic(|this: &Weak<Inner<C>>| {
            let target: Weak<dyn Dispatch<C::Message>> = this.clone();
            Inner {
                id,
                this: this.clone(),
                component,
                host: RefCell::new(host),
                view: RefCell::new(view),
                state: RefCell::new(Rc::clone(&state)),
                phase: Cell::new(Phase::Initialized),
                mailbox: RefCell::new(VecDeque::new()),
                tracker: RefCell::new(RenderTracker::new()),
                frames: FrameCoalescer::new(frames),
                effects: RefCell::new(HashMap::new()),
                next_effect: Cell::new(0),
                handle: Handle::new(target, id),
            }
        });

        inner.write(&state);
        tracing::debug!(instance = %id, "mounted");
        inner.phase.set(Phase::Idle);
        inner.drain_exclusive();

        if let Some(effect) = effect {
            inner.resolve(effect);
        }

        Self { inner }
    }

    /// Process `message` to completion.
    ///
    /// If called while this instance is already updating (from a writer or
    /// through a handle), the message is queued and processed right after the
    /// current one, in submission order.
    pub fn send(&self, message: C::Message) {
        self.inner.send(message);
    }

    /// Map a host event and send the resulting message, if any.
    pub fn handle_event(&self, event: &C::Event) -> bool {
        match self.inner.component.event(event) {
            Some(message) => {
                self.inner.send(message);
                true
            }
            None => {
                tracing::trace!(instance = %self.inner.id, "event mapped to no message");
                false
            }
        }
    }

    /// Host notification that attribute `name` changed from `old` to `new`.
    ///
    /// Only attributes listed in [`Component::observed_attributes`] are
    /// recorded and mapped.
    pub fn attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>) -> bool {
        let inner = &self.inner;
        if !inner.component.observed_attributes().contains(&name) {
            tracing::trace!(instance = %inner.id, name, "unobserved attribute ignored");
            return false;
        }
        inner.host.borrow_mut().set_attribute(name, new);
        tracing::trace!(instance = %inner.id, name, ?old, ?new, "attribute changed");

        match inner.component.attribute_changed(name, new) {
            Some(message) => {
                inner.send(message);
                true
            }
            None => false,
        }
    }

    /// Cancel the pending frame and every in-flight effect.
    pub fn teardown(&self) {
        self.inner.teardown();
    }

    pub fn handle(&self) -> Handle<C::Message> {
        self.inner.handle.clone()
    }

    /// The current state (not necessarily painted yet).
    pub fn state(&self) -> Rc<C::State> {
        Rc::clone(&self.inner.state.borrow())
    }

    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }

    pub fn id(&self) -> InstanceId {
        self.inner.id
    }

    pub fn component(&self) -> &C {
        &self.inner.component
    }

    pub fn host(&self) -> Ref<'_, HostElement> {
        self.inner.host.borrow()
    }

    /// Inspect the view root.
    pub fn with_view<R>(&self, f: impl FnOnce(&C::View) -> R) -> R {
        f(&self.inner.view.borrow())
    }

    /// The state the view was last written with.
    pub fn rendered_state(&self) -> Option<Rc<C::State>> {
        self.inner.tracker.borrow().last_rendered().cloned()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.inner.frames.is_pending()
    }

    /// Effects started but not yet settled.
    pub fn pending_effects(&self) -> usize {
        self.inner.effects.borrow().len()
    }
}

impl<C: Component> Drop for ComponentInstance<C> {
    fn drop(&mut self) {
        self.inner.teardown();
    }
}

impl<C: Component> fmt::Debug for ComponentInstance<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("id", &self.inner.id)
            .field("phase", &self.inner.phase.get())
            .field("pending_frame", &self.inner.frames.is_pending())
            .field("pending_effects", &self.inner.effects.borrow().len())
            .finish()
    }
}

impl<C: Component> Inner<C> {
    fn send(&self, message: C::Message) {
        match self.phase.get() {
            Phase::TornDown => {
                tracing::debug!(instance = %self.id, "message dropped after teardown");
            }
            Phase::Idle => {
                self.mailbox.borrow_mut().push_back(message);
                self.drain_exclusive();
            }
            Phase::Initialized | Phase::Updating => {
                self.mailbox.borrow_mut().push_back(message);
                tracing::trace!(instance = %self.id, "message queued");
            }
        }
    }

    /// Drain the mailbox with the instance marked as updating.
    fn drain_exclusive(&self) {
        self.exclusive(|_| {});
    }

    /// Run `f` and then the mailbox with the instance marked as updating.
    /// Must only be entered from `Idle`.
    fn exclusive(&self, f: impl FnOnce(&Self)) {
        self.phase.set(Phase::Updating);
        let _idle = scopeguard::guard(&self.phase, |phase| {
            if phase.get() == Phase::Updating {
                phase.set(Phase::Idle);
            }
        });

        f(self);
        loop {
            if self.phase.get() == Phase::TornDown {
                break;
            }
            let next = self.mailbox.borrow_mut().pop_front();
            let Some(message) = next else {
                break;
            };
            self.step(message);
        }
    }

    fn step(&self, message: C::Message) {
        let current = Rc::clone(&self.state.borrow());
        let (next, effect) = self.component.update(&current, message);

        if Rc::ptr_eq(&current, &next) {
            tracing::trace!(instance = %self.id, "state unchanged");
        } else {
            *self.state.borrow_mut() = Rc::clone(&next);
            self.request_render(next);
        }

        if let Some(effect) = effect {
            self.resolve(effect);
        }
    }

    fn request_render(&self, state: Rc<C::State>) {
        let this = self.this.clone();
        let token = self.frames.schedule_render(state, move |state| {
            if let Some(inner) = this.upgrade() {
                inner.frame_fired(state);
            }
        });
        tracing::trace!(instance = %self.id, %token, "render requested");
    }

    fn frame_fired(&self, state: Rc<C::State>) {
        match self.phase.get() {
            Phase::TornDown => {}
            Phase::Idle => self.exclusive(|inner| inner.write(&state)),
            Phase::Initialized | Phase::Updating => self.write(&state),
        }
    }

    fn write(&self, state: &Rc<C::State>) {
        let mut view = self.view.borrow_mut();
        let mut tracker = self.tracker.borrow_mut();
        render::write(
            &ComponentWriter(&self.component),
            &mut tracker,
            &mut view,
            state,
            &self.handle,
        );
    }

    fn resolve(&self, effect: Effect<C::Message>) {
        let key = self.next_effect.get();
        self.next_effect.set(key + 1);

        let this = self.this.clone();
        let task = tokio::task::spawn_local(async move {
            let outcome = effect.run().await;
            if let Some(inner) = this.upgrade() {
                inner.effect_settled(key, outcome);
            }
        });
        self.effects.borrow_mut().insert(key, task.abort_handle());
        tracing::trace!(instance = %self.id, effect = key, "effect started");
    }

    fn effect_settled(&self, key: u64, outcome: Result<Option<C::Message>, EffectError>) {
        self.effects.borrow_mut().remove(&key);
        match outcome {
            Ok(Some(message)) => self.send(message),
            Ok(None) => {
                tracing::trace!(instance = %self.id, effect = key, "effect finished without a message");
            }
            Err(error) => {
                tracing::warn!(instance = %self.id, effect = key, %error, "effect failed");
                if let Some(message) = self.component.effect_failed(error) {
                    self.send(message);
                }
            }
        }
    }

    fn teardown(&self) {
        if self.phase.get() == Phase::TornDown {
            return;
        }
        self.phase.set(Phase::TornDown);
        self.frames.cancel();
        self.mailbox.borrow_mut().clear();

        let effects = std::mem::take(&mut *self.effects.borrow_mut());
        let aborted = effects.len();
        for (_, task) in effects {
            task.abort();
        }
        tracing::debug!(instance = %self.id, aborted, "torn down");
    }
}

impl<C: Component> Dispatch<C::Message> for Inner<C> {
    fn dispatch(&self, message: C::Message) {
        self.send(message);
    }
}
