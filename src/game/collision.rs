use super::grid::{Cell, GridSpace};
use super::state::Snake;

/// What happens if the head moves onto a given cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The cell holds the food; the snake grows
    FoodHit,
    /// The cell belongs to the snake's body (its tail excluded)
    SelfCollision,
    /// The cell is off the grid
    OutOfBounds,
    /// Plain move
    Advance,
}

impl MoveOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, MoveOutcome::SelfCollision | MoveOutcome::OutOfBounds)
    }
}

pub struct CollisionDetector;

impl CollisionDetector {
    /// Classify a prospective head cell.
    ///
    /// The food check comes first and ignores bounds and body: food is only
    /// ever placed on free in-grid cells. The tail is not an obstacle because
    /// it vacates its cell on a plain advance.
    pub fn classify(next_head: Cell, snake: &Snake, food: Option<Cell>, grid: &GridSpace) -> MoveOutcome {
        if food == Some(next_head) {
            return MoveOutcome::FoodHit;
        }

        if !grid.contains(next_head) {
            return MoveOutcome::OutOfBounds;
        }

        if snake.contains(next_head) && next_head != snake.tail() {
            return MoveOutcome::SelfCollision;
        }

        MoveOutcome::Advance
    }
}
