//! The contract a concrete component implements.

use std::rc::Rc;

use super::effect::{Effect, EffectError};
use super::handle::Handle;
use super::host::HostElement;
use crate::render::ViewWriter;

/// Result of `init` and `update`: the next state plus an optional effect.
///
/// Returning `Rc::clone(state)` means "unchanged"; change detection is by
/// identity only.
pub type Transition<S, M> = (Rc<S>, Option<Effect<M>>);

/// A view component driven by messages.
///
/// `init` and `update` are required and must be pure; everything else
/// defaults to a no-op.
pub trait Component: 'static {
    type State: 'static;
    type Message: 'static;
    type View: 'static;
    type Event;

    /// Initial state, read from the host element's configuration.
    fn init(&self, host: &HostElement) -> Transition<Self::State, Self::Message>;

    /// Next state for `message`.
    ///
    /// Never mutate `state` in place; return a fresh `Rc` when the state
    /// changes.
    fn update(
        &self,
        state: &Rc<Self::State>,
        message: Self::Message,
    ) -> Transition<Self::State, Self::Message>;

    /// Build the view for the first state. Runs once per instance.
    fn mount(&self, _view: &mut Self::View, _state: &Self::State, _handle: &Handle<Self::Message>) {
    }

    /// Redraw the view for a new state.
    fn redraw(
        &self,
        _view: &mut Self::View,
        _prev: &Self::State,
        _next: &Self::State,
        _handle: &Handle<Self::Message>,
    ) {
    }

    /// Map a host event; `None` suppresses dispatch.
    fn event(&self, _event: &Self::Event) -> Option<Self::Message> {
        None
    }

    /// Attribute names whose changes are delivered to `attribute_changed`.
    fn observed_attributes(&self) -> &[&'static str] {
        &[]
    }

    fn attribute_changed(&self, _name: &str, _value: Option<&str>) -> Option<Self::Message> {
        None
    }

    /// Map a failed effect to a message. By default the failure is only logged.
    fn effect_failed(&self, _error: EffectError) -> Option<Self::Message> {
        None
    }
}

/// Presents a component's `mount`/`redraw` pair as a [`ViewWriter`].
pub(crate) struct ComponentWriter<'a, C>(pub(crate) &'a C);

impl<C: Component> ViewWriter for ComponentWriter<'_, C> {
    type View = C::View;
    type State = C::State;
    type Handle = Handle<C::Message>;

    fn mount(&self, view: &mut C::View, state: &C::State, handle: &Handle<C::Message>) {
        self.0.mount(view, state, handle)
    }

    fn update(
        &self,
        view: &mut C::View,
        prev: &C::State,
        next: &C::State,
        handle: &Handle<C::Message>,
    ) {
        self.0.redraw(view, prev, next, handle)
    }
}
