//! # Utilities Module
//!
//! Grid/world conversions and grid pathfinding shared by the simulation.

pub mod math;
pub mod pathfinding;

pub use math::*;
pub use pathfinding::*;
