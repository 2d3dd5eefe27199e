//! Mount/update writer pair behind a single dispatch.

use std::rc::Rc;

use super::tracker::RenderTracker;

/// Side-effecting view writers for one kind of component.
///
/// `mount` runs once per instance with the first state; `update` runs for
/// every later state that differs by identity. Both default to no-ops, and
/// both are expected to redraw from scratch: a writer must depend only on its
/// arguments, never on having seen every intermediate state.
pub trait ViewWriter {
    type View;
    type State;
    type Handle;

    fn mount(&self, _view: &mut Self::View, _state: &Self::State, _handle: &Self::Handle) {}

    fn update(
        &self,
        _view: &mut Self::View,
        _prev: &Self::State,
        _next: &Self::State,
        _handle: &Self::Handle,
    ) {
    }
}

/// Write `state` to `view`, mounting if the tracker has nothing recorded yet.
///
/// This is the only place that chooses between the two writer signatures.
pub fn write<W: ViewWriter>(
    writer: &W,
    tracker: &mut RenderTracker<W::State>,
    view: &mut W::View,
    state: &Rc<W::State>,
    handle: &W::Handle,
) {
    if tracker.is_mounted() {
        tracker.update(
            |view, prev, next, handle| writer.update(view, prev, next, handle),
            view,
            state,
            handle,
        );
    } else {
        tracker.mount(
            |view, state, handle| writer.mount(view, state, handle),
            view,
            state,
            handle,
        );
    }
}

/// A [`ViewWriter`] built from a pair of closures.
pub struct FnWriter<V, S, H, M, U> {
    mount: M,
    update: U,
    _types: std::marker::PhantomData<fn(&mut V, &S, &H)>,
}

/// Pair a mount closure with an update closure.
pub fn combine<V, S, H, M, U>(mount: M, update: U) -> FnWriter<V, S, H, M, U>
where
    M: Fn(&mut V, &S, &H),
    U: Fn(&mut V, &S, &S, &H),
{
    FnWriter {
        mount,
        update,
        _types: std::marker::PhantomData,
    }
}

impl<V, S, H, M, U> ViewWriter for FnWriter<V, S, H, M, U>
where
    M: Fn(&mut V, &S, &H),
    U: Fn(&mut V, &S, &S, &H),
{
    type View = V;
    type State = S;
    type Handle = H;

    fn mount(&self, view: &mut V, state: &S, handle: &H) {
        (self.mount)(view, state, handle)
    }

    fn update(&self, view: &mut V, prev: &S, next: &S, handle: &H) {
        (self.update)(view, prev, next, handle)
    }
}
