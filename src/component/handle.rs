use std::fmt;
use std::rc::Weak;

use super::instance::InstanceId;

/// Receiver side of a [`Handle`].
pub(crate) trait Dispatch<M> {
    fn dispatch(&self, message: M);
}

/// Dispatch capability handed to view writers.
///
/// View code keeps clones of it in listeners and calls [`Handle::send`] to
/// submit messages. It does not keep the instance alive: once the instance is
/// gone, `send` drops the message and returns `false`.
pub struct Handle<M> {
    target: Weak<dyn Dispatch<M>>,
    instance: InstanceId,
}

impl<M> Handle<M> {
    pub(crate) fn new(target: Weak<dyn Dispatch<M>>, instance: InstanceId) -> Self {
        Self { target, instance }
    }

    /// Submit `message` to the owning instance.
    pub fn send(&self, message: M) -> bool {
        match self.target.upgrade() {
            Some(target) => {
                target.dispatch(message);
                true
            }
            None => {
                tracing::trace!(instance = %self.instance, "message sent to dropped instance");
                false
            }
        }
    }

    /// Listener that maps a view-level value to a message and sends it.
    pub fn callback<E, F>(&self, map: F) -> impl Fn(E)
    where
        F: Fn(E) -> M,
    {
        let handle = self.clone();
        move |value| {
            handle.send(map(value));
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    /// False once the owning instance has been dropped.
    pub fn is_live(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl<M> Clone for Handle<M> {
    fn clone(&self) -> Self {
        Self {
            target: Weak::clone(&self.target),
            instance: self.instance,
        }
    }
}

impl<M> fmt::Debug for Handle<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("instance", &self.instance)
            .field("live", &self.is_live())
            .finish()
    }
}
