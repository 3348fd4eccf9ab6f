//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timers or
//! rendering. Hosts drive it through [`SnakeEngine`] and draw the
//! [`Snapshot`] it hands back.

pub mod collision;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use collision::{CollisionDetector, MoveOutcome};
pub use config::GameConfig;
pub use direction::{Direction, DirectionController};
pub use engine::SnakeEngine;
pub use error::GameError;
pub use food::FoodSpawner;
pub use grid::{Cell, GridSpace};
pub use state::{EndReason, GameStatus, Snake, Snapshot};
