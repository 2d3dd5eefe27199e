use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::types::Config;

/// Highest accepted paint rate.
pub const MAX_FPS: u32 = 240;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl Config {
    /// `<config dir>/framebind/config.toml`, or `./framebind/config.toml`
    /// when the platform has no config dir.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("framebind")
            .join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Parse and validate `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a frame rate outside `1..=MAX_FPS` and a log level that is not
    /// a valid `EnvFilter`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fps = self.frames.fps;
        if !(1..=MAX_FPS).contains(&fps) {
            return Err(ConfigError::Invalid {
                field: "frames.fps",
                reason: format!("{fps} is outside 1..={MAX_FPS}"),
            });
        }

        EnvFilter::try_new(&self.logging.level).map_err(|err| ConfigError::Invalid {
            field: "logging.level",
            reason: format!("'{}': {err}", self.logging.level),
        })?;

        Ok(())
    }
}
