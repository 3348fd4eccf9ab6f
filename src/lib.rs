//! Grid Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game engine, free of I/O and timers (game module)
//! - Configuration loading (settings module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive host that drives the engine (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod settings;
