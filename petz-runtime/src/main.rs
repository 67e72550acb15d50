//! Headless PETZ driver.
//!
//! Restores the companion, ticks it on a timer and reads one command per
//! line from stdin (`feed`, `play`, `sleep`, `tick`, `status`,
//! `pass-through`, `quit`). Each command prints one JSON line on stdout.
//! Logs go to stderr.
//!
//! ```text
//! petz [--config petz.toml]
//! PETZ_CONFIG=/etc/petz.toml petz
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use petz_runtime::{Command, PetController, PetzConfig, spawn_tick_loop};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "petz.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (config, source) = load_config(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    match &source {
        ConfigSource::File(path) => info!(path = %path.display(), "Configuration loaded"),
        ConfigSource::Missing(path) => {
            warn!(path = %path.display(), "Config file not found, using defaults");
        }
    }
    info!(
        backend = ?config.persistence.backend,
        path = %config.persistence.path.display(),
        slot = %config.persistence.slot,
        interval_secs = config.tick.interval().as_secs(),
        "petz starting"
    );

    let controller = PetController::from_config(&config);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = spawn_tick_loop(controller.clone(), config.tick.interval(), shutdown_rx);

    println!("{}", serde_json::to_string(&controller.snapshot())?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(input = %line.trim(), error = %e, "Ignoring unknown command");
                continue;
            }
        };
        match command.execute(&controller) {
            Some(reply) => println!("{}", serde_json::to_string(&reply)?),
            None => break,
        }
    }

    // Receiver may already be gone if the loop exited on its own.
    let _ = shutdown_tx.send(true);
    let ticks = ticker.await.context("tick loop panicked")?;
    info!(ticks, "petz stopped");
    Ok(())
}

/// Headless PETZ driver: ticks a companion and reads commands from stdin.
#[derive(Parser, Debug)]
#[command(name = "petz")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path. A missing file means defaults.
    #[arg(short = 'c', long, env = "PETZ_CONFIG", value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
}

fn load_config(args: &Args) -> anyhow::Result<(PetzConfig, ConfigSource)> {
    let path = args.config.clone();
    if !path.exists() {
        return Ok((PetzConfig::default(), ConfigSource::Missing(path)));
    }
    let config = PetzConfig::from_file(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    Ok((config, ConfigSource::File(path)))
}
