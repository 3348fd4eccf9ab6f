use std::fmt;
use std::str::FromStr;

use super::error::GameError;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the delta (dx, dy) for moving in this direction.
    /// Row 0 is the top of the grid, so Up decrements y.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(GameError::UnknownDirection(s.to_string())),
        }
    }
}

/// Holds the committed heading and filters out reversals.
///
/// Changes apply as soon as they are requested; several requests between two
/// ticks overwrite each other, so only the last accepted one is seen by the
/// next tick. A request for the opposite of the committed heading is dropped,
/// never queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionController {
    committed: Direction,
}

impl DirectionController {
    pub const INITIAL: Direction = Direction::Right;

    pub fn new() -> Self {
        Self {
            committed: Self::INITIAL,
        }
    }

    /// Returns whether the request was accepted
    pub fn request_change(&mut self, direction: Direction) -> bool {
        if self.committed.is_opposite(direction) {
            return false;
        }
        self.committed = direction;
        true
    }

    pub fn current(&self) -> Direction {
        self.committed
    }

    pub fn reset(&mut self) {
        self.committed = Self::INITIAL;
    }
}

impl Default for DirectionController {
    fn default() -> Self {
        Self::new()
    }
}
