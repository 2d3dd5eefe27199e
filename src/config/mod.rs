//! Runtime configuration: frame rate, logging, and the demo host element.

mod loader;
mod types;

pub use loader::{ConfigError, MAX_FPS};
pub use types::{Config, FrameConfig, LoggingConfig};
