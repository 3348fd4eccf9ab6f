use std::collections::{HashSet, VecDeque};

use super::direction::Direction;
use super::grid::Cell;

/// The snake in the game
///
/// `body` and `occupied` always hold the same cells; every cell is distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
}

impl Snake {
    /// A straight snake with `head` first and `length - 1` segments trailing
    /// behind it, opposite to `direction`.
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let cells = (0..length.max(1) as i32).map(|i| head.moved_by(-dx * i, -dy * i));
        Self::from_cells(cells)
    }

    /// Build a snake from explicit cells, head first. Duplicates are dropped.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut body = VecDeque::new();
        let mut occupied = HashSet::new();
        for cell in cells {
            if occupied.insert(cell) {
                body.push_back(cell);
            }
        }
        assert!(!body.is_empty(), "snake needs at least one cell");
        Self { body, occupied }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Cells from head to tail
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Move onto `next_head` and drop the tail; length stays the same.
    pub fn advance(&mut self, next_head: Cell) {
        if let Some(tail) = self.body.pop_back() {
            self.occupied.remove(&tail);
        }
        self.grow(next_head);
    }

    /// Move onto `next_head` keeping the tail; length grows by one.
    pub fn grow(&mut self, next_head: Cell) {
        self.body.push_front(next_head);
        self.occupied.insert(next_head);
    }
}

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Idle,
    Running,
    GameOver,
}

/// Why the last session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The snake left the grid
    OutOfBounds,
    /// The snake ran into itself
    SelfCollision,
    /// The snake covers the whole grid; there is nowhere left for food
    BoardFilled,
}

/// Read-only view of the game, produced after every mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Head first
    pub snake_cells: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub status: GameStatus,
    pub direction: Direction,
    pub ticks: u32,
    pub end_reason: Option<EndReason>,
    pub grid_side: usize,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake_cells.first().copied()
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
        );
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        // Move without growing
        snake.advance(Cell::new(6, 5));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert!(!snake.contains(Cell::new(3, 5)));

        // Move with growing
        snake.grow(Cell::new(7, 5));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(7, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_advance_into_own_tail() {
        // A 2x2 loop: the head moves into the cell the tail is leaving
        let mut snake = Snake::from_cells([
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(0, 1),
        ]);
        snake.advance(Cell::new(0, 1));

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(0, 1));
        assert_eq!(snake.occupied().len(), 4);
        assert!(snake.contains(Cell::new(0, 1)));
    }

    #[test]
    fn test_occupied_matches_body() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        snake.advance(Cell::new(5, 4));
        snake.grow(Cell::new(5, 3));

        let from_body: HashSet<Cell> = snake.cells().collect();
        assert_eq!(&from_body, snake.occupied());
    }

    #[test]
    fn test_from_cells_drops_duplicates() {
        let snake = Snake::from_cells([Cell::new(1, 1), Cell::new(1, 1), Cell::new(0, 1)]);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    #[should_panic(expected = "snake needs at least one cell")]
    fn test_from_cells_rejects_empty() {
        Snake::from_cells(std::iter::empty());
    }
}
