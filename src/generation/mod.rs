//! # Generation Module
//!
//! Procedural content generation for mazes and spawn points.
//!
//! All generators draw from an explicitly threaded [`StdRng`], so a level is
//! fully determined by its [`GenerationConfig`] seed.

pub mod encounters;
pub mod items;
pub mod maze;

pub use encounters::*;
pub use items::*;
pub use maze::*;

use crate::game::Position;
use crate::ShadowmazeResult;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls the maze dimensions and the seed every random draw of a level
/// derives from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Maze width in cells
    pub maze_width: u32,
    /// Maze height in cells
    pub maze_height: u32,
}

impl GenerationConfig {
    /// Creates a default generation configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadowmaze::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert_eq!(config.maze_width, 20);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            maze_width: crate::config::defaults::MAZE_WIDTH,
            maze_height: crate::config::defaults::MAZE_HEIGHT,
        }
    }

    /// Creates a configuration for testing with a small maze.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            maze_width: 8,
            maze_height: 6,
        }
    }

    /// Creates a configuration with explicit dimensions.
    pub fn with_dimensions(seed: u64, maze_width: u32, maze_height: u32) -> Self {
        Self {
            seed,
            maze_width,
            maze_height,
        }
    }

    /// Total number of cells in the maze.
    pub fn cell_count(&self) -> usize {
        self.maze_width as usize * self.maze_height as usize
    }

    /// Checks whether a cell lies inside the configured grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.maze_width
            && (pos.y as u32) < self.maze_height
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// All generation systems implement this trait, which keeps a consistent
/// interface for generating, validating, and logging content.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ShadowmazeResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> ShadowmazeResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::Rng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Derives an independent child generator from a master stream.
    ///
    /// Used to give each monster its own RNG while keeping the whole level
    /// reproducible from one seed.
    pub fn derive_rng(master: &mut StdRng) -> StdRng {
        StdRng::seed_from_u64(master.gen())
    }

    /// Lists every cell of the configured grid in row-major order.
    pub fn all_cells(config: &GenerationConfig) -> Vec<Position> {
        let mut cells = Vec::with_capacity(config.cell_count());
        for y in 0..config.maze_height as i32 {
            for x in 0..config.maze_width as i32 {
                cells.push(Position::new(x, y));
            }
        }
        cells
    }
}
