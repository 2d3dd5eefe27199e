//! Stop flag shared by the paint loop, the quit key and the Ctrl-C listener.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Owns the stop flag and hands out handles to it.
#[derive(Default)]
pub struct ShutdownCoordinator {
    handle: ShutdownHandle,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {
        self.handle.signal();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.handle.is_shutting_down()
    }

    pub fn handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }
}

/// Cloneable view of the stop flag. Any holder may raise it.
#[derive(Clone, Default)]
pub struct ShutdownHandle {
    stopping: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn is_shutting_down(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }

    /// Raise the flag and wake every waiter. Later calls are no-ops.
    pub fn signal(&self) {
        if !self.stopping.swap(true, Ordering::SeqCst) {
            tracing::info!("shutdown requested");
            self.notify.notify_waiters();
        }
    }

    /// Resolve once the flag is raised.
    pub async fn wait(&self) {
        // Register interest before checking the flag so a signal landing in
        // between is not lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }
}
