//! # Rendering Module
//!
//! 2D drawing with macroquad. Reads the game state after each tick and never
//! writes to it.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
