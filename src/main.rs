//! Terminal front end for Unvoid Chess.

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use unvoid::chess::core::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use unvoid::Engine;

/// Plays Unvoid Chess in the terminal: two players take turns entering
/// commands on the same keyboard.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Number of files. Asked for interactively when omitted.
    #[arg(long, value_parser = board_side)]
    width: Option<usize>,
    /// Number of ranks. Asked for interactively when omitted.
    #[arg(long, value_parser = board_side)]
    height: Option<usize>,
}

fn board_side(value: &str) -> Result<usize, String> {
    let side: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&side) {
        Ok(side)
    } else {
        Err(format!(
            "board side should be within {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}, got {side}"
        ))
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    // Logs go to stderr, the game itself is played on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    tracing::debug!(?config, "parsed configuration");

    let mut engine = Engine::new(io::stdin().lock(), io::stdout().lock());
    engine.run(config.width, config.height)
}
