mod demo;

use std::path::PathBuf;

use clap::Parser;
use framebind::config::Config;

/// Run a frame-coalesced counter component in the terminal.
#[derive(Debug, Parser)]
#[command(name = "framebind", version, about)]
struct Cli {
    /// Config file (default: ~/.config/framebind/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Paint frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Initial count (overrides the host's `start` attribute).
    #[arg(long, allow_negative_numbers = true)]
    start: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    framebind::logging::init_tracing(&config.logging)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, demo::run(config))
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(fps) = cli.fps {
        config.frames.fps = fps;
    }
    if let Some(start) = cli.start {
        config.host = std::mem::take(&mut config.host).with_attribute("start", start.to_string());
    }
    config.validate()?;
    Ok(config)
}
