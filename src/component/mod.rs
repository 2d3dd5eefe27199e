//! Components and the message loop that drives them.
//!
//! ```text
//! Message ──→ update ──→ (State, Effect) ──→ frame ──→ redraw(View)
//!    ↑                          │                          │
//!    │                          └──→ task ──→ Message      │
//!    └────────────── Handle (from view listeners) ─────────┘
//! ```
//!
//! - `traits.rs` - the `Component` contract (init, update, writers, mappers)
//! - `instance.rs` - one live instance: mailbox, render requests, effect tasks
//! - `effect.rs` - asynchronous work yielding an optional message
//! - `handle.rs` - weak dispatch capability given to view code
//! - `host.rs` - host element configuration read by `init`

mod effect;
mod handle;
mod host;
mod instance;
mod traits;

pub use effect::{Effect, EffectError};
pub use handle::Handle;
pub use host::HostElement;
pub use instance::{ComponentInstance, InstanceId, Phase};
pub use traits::{Component, Transition};
