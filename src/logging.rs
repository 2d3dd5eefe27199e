//! Tracing subscriber setup for the demo host.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` wins over the configured level. Output goes to the configured
/// file (appended), or nowhere: the terminal belongs to the component view.
pub fn init_tracing(config: &LoggingConfig) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339());

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_writer(Arc::new(file)).init();
        }
        None => builder.with_writer(io::sink).init(),
    }
    Ok(())
}
