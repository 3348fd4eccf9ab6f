use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::error::GameError;

pub const GRID_SIDE_RANGE: RangeInclusive<usize> = 15..=99;
pub const CELL_PIXEL_SIZE_RANGE: RangeInclusive<u16> = 5..=20;
pub const INITIAL_SNAKE_LENGTH_RANGE: RangeInclusive<usize> = 3..=5;
pub const TICK_INTERVAL_MS_RANGE: RangeInclusive<u64> = 50..=500;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The grid is `grid_side` × `grid_side` cells
    pub grid_side: usize,
    /// Rendering scale only; the core never reads it
    pub cell_pixel_size: u16,
    /// Length of the snake at the start of a game
    pub initial_snake_length: usize,
    /// Period of the host's tick timer
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_side: 25,
            cell_pixel_size: 10,
            initial_snake_length: 3,
            tick_interval_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_side: usize) -> Self {
        Self {
            grid_side,
            ..Default::default()
        }
    }

    /// Create a small grid, the smallest allowed
    pub fn small() -> Self {
        Self::new(*GRID_SIDE_RANGE.start())
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(40)
    }

    /// Check that every option is within its valid range
    pub fn validate(&self) -> Result<(), GameError> {
        check("grid_side", self.grid_side as u64, widen(&GRID_SIDE_RANGE))?;
        check(
            "cell_pixel_size",
            u64::from(self.cell_pixel_size),
            u64::from(*CELL_PIXEL_SIZE_RANGE.start())..=u64::from(*CELL_PIXEL_SIZE_RANGE.end()),
        )?;
        check(
            "initial_snake_length",
            self.initial_snake_length as u64,
            widen(&INITIAL_SNAKE_LENGTH_RANGE),
        )?;
        check(
            "tick_interval_ms",
            self.tick_interval_ms,
            TICK_INTERVAL_MS_RANGE,
        )?;
        Ok(())
    }

    /// Copy of this configuration with every option pulled into its valid range
    pub fn clamped(&self) -> Self {
        Self {
            grid_side: self
                .grid_side
                .clamp(*GRID_SIDE_RANGE.start(), *GRID_SIDE_RANGE.end()),
            cell_pixel_size: self
                .cell_pixel_size
                .clamp(*CELL_PIXEL_SIZE_RANGE.start(), *CELL_PIXEL_SIZE_RANGE.end()),
            initial_snake_length: self.initial_snake_length.clamp(
                *INITIAL_SNAKE_LENGTH_RANGE.start(),
                *INITIAL_SNAKE_LENGTH_RANGE.end(),
            ),
            tick_interval_ms: self
                .tick_interval_ms
                .clamp(*TICK_INTERVAL_MS_RANGE.start(), *TICK_INTERVAL_MS_RANGE.end()),
        }
    }
}

fn widen(range: &RangeInclusive<usize>) -> RangeInclusive<u64> {
    *range.start() as u64..=*range.end() as u64
}

fn check(field: &'static str, value: u64, range: RangeInclusive<u64>) -> Result<(), GameError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(GameError::Configuration {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
