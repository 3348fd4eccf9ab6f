use super::direction::Direction;

/// A cell on the game grid. Zero-based; signed so that the neighbours of
/// edge cells can be represented before they are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring cell one step in `direction`
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Square playing field of `side` × `side` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpace {
    side: usize,
}

impl GridSpace {
    pub fn new(side: usize) -> Self {
        Self { side }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cell_count(&self) -> usize {
        self.side * self.side
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        let side = self.side as i32;
        cell.x >= 0 && cell.x < side && cell.y >= 0 && cell.y < side
    }

    /// Every cell of the grid, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let side = self.side as i32;
        (0..side).flat_map(move |y| (0..side).map(move |x| Cell::new(x, y)))
    }
}
