use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use super::error::GameError;
use super::grid::{Cell, GridSpace};

/// Random draws tried before falling back to an explicit scan of free cells
pub const MAX_SPAWN_ATTEMPTS: usize = 1024;

/// Places food on a uniformly random free cell
pub struct FoodSpawner<R: Rng> {
    rng: R,
}

impl FoodSpawner<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for FoodSpawner<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> FoodSpawner<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Pick a cell of `grid` that is not in `occupied`.
    ///
    /// Uses rejection sampling first. On a crowded grid, after
    /// [`MAX_SPAWN_ATTEMPTS`] misses, it chooses uniformly among the remaining
    /// free cells instead, so the call always terminates.
    pub fn spawn(&mut self, occupied: &HashSet<Cell>, grid: &GridSpace) -> Result<Cell, GameError> {
        let free = grid.cell_count().saturating_sub(
            occupied.iter().filter(|&&cell| grid.contains(cell)).count(),
        );
        if free == 0 {
            return Err(GameError::GridFull { side: grid.side() });
        }

        let side = grid.side() as i32;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let cell = Cell::new(self.rng.gen_range(0..side), self.rng.gen_range(0..side));
            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }

        tracing::debug!(free, "rejection sampling exhausted, scanning free cells");
        grid.cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(&mut self.rng)
            .ok_or(GameError::GridFull { side: grid.side() })
    }
}
