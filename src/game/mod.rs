//! # Game Module
//!
//! Core simulation: the maze model, spatial queries, actors, and the
//! per-tick orchestration that ties them together.
//!
//! - Maze representation and the read-only [`MazeView`] seam
//! - Wall collision and line-of-sight over the grid
//! - Player, collectibles, and the monster state machine
//! - Game state: entity directory, events, and the tick sequence

pub mod collision;
pub mod entities;
pub mod monster;
pub mod state;
pub mod strategy;
pub mod world;

pub use collision::*;
pub use entities::*;
pub use monster::*;
pub use state::*;
pub use strategy::*;
pub use world::*;

use crate::utils::EPSILON;
use serde::{Deserialize, Serialize};

/// Represents a cell coordinate on the maze grid.
///
/// # Examples
///
/// ```
/// use shadowmaze::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadowmaze::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the neighbouring cell in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .map(|direction| self.step(direction))
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// A continuous point in world space.
///
/// World space is laid over the grid with x growing to the right and y growing
/// downwards; cell `(cx, cy)` covers `[cx * cell_size, (cx + 1) * cell_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    /// Creates a new world position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length of this point taken as a vector.
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to another point.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadowmaze::WorldPos;
    ///
    /// let a = WorldPos::new(0.0, 0.0);
    /// let b = WorldPos::new(3.0, 4.0);
    /// assert_eq!(a.distance(b), 5.0);
    /// ```
    pub fn distance(self, other: WorldPos) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `None` for (near) zero vectors.
    pub fn normalized(self) -> Option<WorldPos> {
        let length = self.length();
        if length < EPSILON {
            None
        } else {
            Some(WorldPos::new(self.x / length, self.y / length))
        }
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for WorldPos {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for WorldPos {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f32> for WorldPos {
    type Output = Self;

    fn mul(self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}

/// Cardinal directions on the maze grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadowmaze::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::East => Position::new(1, 0),
            Direction::South => Position::new(0, 1),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta doesn't correspond to a single cardinal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    /// The wall of the current cell this direction passes through.
    pub fn side(self) -> Side {
        match self {
            Direction::North => Side::Top,
            Direction::East => Side::Right,
            Direction::South => Side::Bottom,
            Direction::West => Side::Left,
        }
    }

    /// Unit vector of this direction in world space.
    pub fn unit_vector(self) -> WorldPos {
        let delta = self.to_delta();
        WorldPos::new(delta.x as f32, delta.y as f32)
    }

    /// Returns the 4 cardinal directions in clockwise order from north.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }
}
