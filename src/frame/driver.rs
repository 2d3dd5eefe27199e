//! Fixed-rate paint loop for hosts without a native frame clock.

use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::queue::QueuedFrames;
use crate::shutdown::ShutdownHandle;

/// Step `frames` once per `interval` until shutdown is signalled.
///
/// `on_frame` runs after every step with the number of callbacks that fired;
/// hosts paint and poll their input there. Returns the number of ticks.
pub async fn run_frames<F>(
    frames: &QueuedFrames,
    interval: Duration,
    shutdown: ShutdownHandle,
    mut on_frame: F,
) -> u64
where
    F: FnMut(usize),
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ticks = 0;

    loop {
        tokio::select! {
            _ = shutdown.wait() => break,
            _ = ticker.tick() => {
                let fired = frames.step();
                on_frame(fired);
                ticks += 1;
                if shutdown.is_shutting_down() {
                    break;
                }
            }
        }
    }

    tracing::debug!(ticks, fired = frames.frames_fired(), "frame loop stopped");
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameScheduler;
    use crate::shutdown::ShutdownCoordinator;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test(start_paused = true)]
    async fn steps_until_shutdown() {
        let frames = QueuedFrames::new();
        let coordinator = ShutdownCoordinator::new();
        let handle = coordinator.handle();
        let hit = Rc::new(Cell::new(false));
        let flag = hit.clone();
        frames.schedule_frame(Box::new(move || flag.set(true)));

        let mut seen = 0;
        let ticks = run_frames(&frames, Duration::from_millis(16), coordinator.handle(), |_| {
            seen += 1;
            if seen == 3 {
                handle.signal();
            }
        })
        .await;

        assert_eq!(ticks, 3);
        assert!(hit.get());
        assert_eq!(frames.frames_fired(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn already_signalled_stops_immediately() {
        let frames = QueuedFrames::new();
        let coordinator = ShutdownCoordinator::new();
        coordinator.signal();

        let ticks = run_frames(&frames, Duration::from_millis(16), coordinator.handle(), |_| {}).await;

        assert!(ticks <= 1);
    }
}
