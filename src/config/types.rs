use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::component::HostElement;

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub frames: FrameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Host element the demo component is constructed with.
    #[serde(default = "default_host")]
    pub host: HostElement,
}

/// Paint loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Paint frames per second (default: 60).
    #[serde(default = "default_fps")]
    pub fps: u32,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file. Logs are discarded when unset, since the terminal is in use.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_fps() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> HostElement {
    HostElement::new("x-counter")
        .with_attribute("start", "0")
        .with_attribute("step", "1")
}

impl FrameConfig {
    /// Time between paint frames. Assumes a validated (non-zero) rate.
    pub fn interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frames: FrameConfig::default(),
            logging: LoggingConfig::default(),
            host: default_host(),
        }
    }
}
