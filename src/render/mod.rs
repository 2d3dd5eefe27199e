//! Render bookkeeping: which state a view last saw, and which writer to call.
//!
//! - `tracker.rs` - last-rendered state per instance, mount/update dispatch
//! - `writer.rs` - mount + update writer pair combined behind one entry point

mod tracker;
mod writer;

pub use tracker::RenderTracker;
pub use writer::{combine, write, FnWriter, ViewWriter};
