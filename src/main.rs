use anyhow::Context;
use clap::Parser;
use drawlab::{Config, PaintState};
use std::path::PathBuf;

mod script;

#[derive(Parser, Debug)]
#[command(name = "drawlab")]
#[command(
    version,
    about = "Gesture-driven painting engine (headless replay driver)"
)]
struct Cli {
    /// JSON list of input steps to replay
    #[arg(long, short = 's', value_name = "FILE")]
    script: PathBuf,

    /// Where to write the resulting PNG (defaults to the configured save directory)
    #[arg(long, short = 'o', value_name = "FILE")]
    out: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let steps = script::load(&cli.script)?;

    let mut state = PaintState::from_config(&config)?;
    let stats = script::replay(&mut state, &steps)?;
    log::info!(
        "Replayed {} steps ({} events dropped)",
        stats.steps,
        stats.dropped_events
    );

    let saved = state
        .save(cli.out.as_deref())
        .context("Failed to save canvas")?;
    println!("{}", saved.display());
    Ok(())
}
