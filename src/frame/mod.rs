//! Paint-frame scheduling.
//!
//! - `scheduler.rs` - the injectable platform primitive (schedule/cancel)
//! - `coalesce.rs` - at most one pending frame per instance, latest state wins
//! - `queue.rs` - deterministic, manually stepped scheduler
//! - `driver.rs` - tokio interval loop stepping a queue at a fixed rate

mod coalesce;
pub mod driver;
mod queue;
mod scheduler;

pub use coalesce::FrameCoalescer;
pub use queue::QueuedFrames;
pub use scheduler::{FrameCallback, FrameScheduler, FrameToken};
