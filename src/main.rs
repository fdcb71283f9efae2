use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use snake::config::{GameConfig, DEFAULT_BOARD_SIZE};
use snake::game::SnakeGame;

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// Side length of the square board
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    board_size: u16,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Most verbose level written to the log file
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(cli.log_level)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = GameConfig::with_board_size(cli.board_size)?;
    tracing::info!(?config, "starting");

    let mut game = SnakeGame::new(config)?;
    game.run()
}
