//! Frame-coalesced state-to-view binding for UI components.
//!
//! A component supplies a pure transition function and a view writer; the
//! loop keeps the view an idempotent projection of the latest state and feeds
//! asynchronous effect results back in as ordinary messages.
//!
//! ```text
//! event ──→ send ──→ update ──→ (state, effect)
//!             ↑           │            │
//!             │     frame coalescer    └──→ local task ──┐
//!             │           ↓                              │
//!             │    render tracker ──→ writer (view)      │
//!             └──────────────────────────────────────────┘
//! ```

pub mod component;
pub mod config;
pub mod frame;
pub mod logging;
pub mod render;
pub mod shutdown;

pub use component::{
    Component, ComponentInstance, Effect, EffectError, Handle, HostElement, InstanceId, Phase,
    Transition,
};
pub use frame::{FrameCoalescer, FrameScheduler, FrameToken, QueuedFrames};
pub use render::{RenderTracker, ViewWriter};
