//! Where the game configuration comes from
//!
//! Precedence: command-line overrides, then the TOML file, then defaults.
//! Values out of range are pulled back into range with a warning rather than
//! refusing to start.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

use crate::game::GameConfig;

/// Options given on the command line; `None` leaves the file/default value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub grid_side: Option<usize>,
    pub cell_pixel_size: Option<u16>,
    pub initial_snake_length: Option<usize>,
    pub tick_interval_ms: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut GameConfig) {
        if let Some(grid_side) = self.grid_side {
            config.grid_side = grid_side;
        }
        if let Some(cell_pixel_size) = self.cell_pixel_size {
            config.cell_pixel_size = cell_pixel_size;
        }
        if let Some(initial_snake_length) = self.initial_snake_length {
            config.initial_snake_length = initial_snake_length;
        }
        if let Some(tick_interval_ms) = self.tick_interval_ms {
            config.tick_interval_ms = tick_interval_ms;
        }
    }
}

/// Parse a TOML document; missing keys keep their defaults
pub fn parse_config(contents: &str) -> Result<GameConfig> {
    toml::from_str(contents).context("Failed to parse game configuration")
}

/// Build the configuration for a run
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            parse_config(&contents)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    overrides.apply(&mut config);
    Ok(sanitize(config))
}

/// Clamp out-of-range values, logging what was changed
pub fn sanitize(config: GameConfig) -> GameConfig {
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            let clamped = config.clamped();
            warn!(%err, ?clamped, "configuration out of range, clamping");
            clamped
        }
    }
}
