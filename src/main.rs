use anyhow::Result;
use clap::Parser;
use grid_snake::modes::HumanMode;
use grid_snake::settings::{ConfigOverrides, load_config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a square grid, in your terminal")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length in cells (15-99)
    #[arg(long)]
    grid_side: Option<usize>,

    /// Cell size in pixels (5-20); every 5 pixels is one terminal column
    #[arg(long)]
    cell_pixel_size: Option<u16>,

    /// Snake length at the start of a game (3-5)
    #[arg(long)]
    initial_length: Option<usize>,

    /// Milliseconds between ticks (50-500)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Where to write log output
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    grid_snake::logging::init(&cli.log_file)?;

    let overrides = ConfigOverrides {
        grid_side: cli.grid_side,
        cell_pixel_size: cli.cell_pixel_size,
        initial_snake_length: cli.initial_length,
        tick_interval_ms: cli.tick_ms,
    };
    let config = load_config(cli.config.as_deref(), &overrides)?;
    tracing::info!(?config, "configuration loaded");

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
