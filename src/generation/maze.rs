//! # Maze Generation
//!
//! Perfect mazes via a randomized recursive backtracker.
//!
//! The backtracker is run with an explicit stack rather than the call stack,
//! since its depth can reach the number of cells in the grid.

use crate::game::{Direction, Maze, Position};
use crate::generation::utils::create_rng;
use crate::{GenerationConfig, Generator, ShadowmazeError, ShadowmazeResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// One level of the backtracker: a cell and the directions still to try.
struct Frame {
    cell: Position,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter(cell: Position, rng: &mut StdRng) -> Self {
        let mut directions = Direction::cardinal();
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Generator for perfect mazes.
///
/// Starting from `start`, the generator walks to a random unvisited neighbour,
/// knocking down the wall pair between them, and backs up whenever a cell has
/// no unvisited neighbours left. The open passages form a spanning tree of the
/// grid.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    /// Cell the carve starts from
    pub start: Position,
    /// Whether generated mazes are checked for perfectness before returning
    pub validate_output: bool,
}

impl MazeGenerator {
    /// Creates a generator starting at (0, 0).
    ///
    /// # Examples
    ///
    /// ```
    /// use shadowmaze::{GenerationConfig, Generator, MazeGenerator};
    /// use shadowmaze::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::for_testing(5);
    /// let mut rng = create_rng(&config);
    /// let maze = MazeGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert!(maze.is_perfect());
    /// ```
    pub fn new() -> Self {
        Self {
            start: Position::origin(),
            validate_output: true,
        }
    }

    /// Creates a generator that starts carving from `start`.
    pub fn with_start(start: Position) -> Self {
        Self {
            start,
            ..Self::new()
        }
    }

    /// Generates a `width` x `height` maze from a seed.
    pub fn generate_seeded(&self, width: u32, height: u32, seed: u64) -> ShadowmazeResult<Maze> {
        let config = GenerationConfig::with_dimensions(seed, width, height);
        let mut rng = create_rng(&config);
        self.generate(&config, &mut rng)
    }

    /// Resets `maze` to all walls and carves a fresh maze into it in place.
    ///
    /// The grid is reused, so a level reset does not reallocate. Returns the
    /// number of passages opened.
    pub fn carve(&self, maze: &mut Maze, rng: &mut StdRng) -> ShadowmazeResult<usize> {
        maze.reset();
        if maze.width == 0 || maze.height == 0 {
            return Err(ShadowmazeError::GenerationFailed(format!(
                "cannot carve a {}x{} maze",
                maze.width, maze.height
            )));
        }
        if !maze.is_valid_position(self.start) {
            return Err(ShadowmazeError::GenerationFailed(format!(
                "start cell ({}, {}) is outside the {}x{} maze",
                self.start.x, self.start.y, maze.width, maze.height
            )));
        }

        let mut opened = 0;
        let mut max_depth = 1;
        let mut stack = vec![Frame::enter(self.start, rng)];
        if let Some(cell) = maze.cell_at_mut(self.start.x, self.start.y) {
            cell.visited = true;
        }

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.directions.len() {
                stack.pop();
                continue;
            }

            let direction = frame.directions[frame.next];
            frame.next += 1;
            let current = frame.cell;
            let neighbor = current.step(direction);

            let unvisited = maze
                .cell_at(neighbor.x, neighbor.y)
                .is_some_and(|cell| !cell.visited);
            if !unvisited {
                continue;
            }

            maze.open_passage(current, direction.side());
            if let Some(cell) = maze.cell_at_mut(neighbor.x, neighbor.y) {
                cell.visited = true;
            }
            opened += 1;
            stack.push(Frame::enter(neighbor, rng));
            max_depth = max_depth.max(stack.len());
        }

        debug!(
            "Carved {}x{} maze: {} passages, max backtrack depth {}",
            maze.width, maze.height, opened, max_depth
        );
        Ok(opened)
    }

    /// Rebuilds `maze` for a new level with the given configuration.
    ///
    /// Reallocates only when the dimensions changed.
    pub fn regenerate(
        &self,
        maze: &mut Maze,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> ShadowmazeResult<()> {
        if maze.width != config.maze_width || maze.height != config.maze_height {
            *maze = Maze::new(config.maze_width, config.maze_height);
        }
        self.carve(maze, rng)?;
        if self.validate_output {
            self.validate(maze, config)?;
        }
        Ok(())
    }
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<Maze> for MazeGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ShadowmazeResult<Maze> {
        if config.maze_width == 0 || config.maze_height == 0 {
            return Err(ShadowmazeError::GenerationFailed(format!(
                "maze dimensions must be positive, got {}x{}",
                config.maze_width, config.maze_height
            )));
        }

        let mut maze = Maze::new(config.maze_width, config.maze_height);
        self.regenerate(&mut maze, config, rng)?;

        info!(
            "Generated {}x{} maze with seed {}",
            config.maze_width, config.maze_height, config.seed
        );
        Ok(maze)
    }

    fn validate(&self, maze: &Maze, config: &GenerationConfig) -> ShadowmazeResult<()> {
        if maze.width != config.maze_width || maze.height != config.maze_height {
            return Err(ShadowmazeError::GenerationFailed(format!(
                "maze is {}x{}, expected {}x{}",
                maze.width, maze.height, config.maze_width, config.maze_height
            )));
        }
        if !maze.walls_are_symmetric() {
            return Err(ShadowmazeError::GenerationFailed(
                "maze has one-sided walls".to_string(),
            ));
        }
        if !maze.is_perfect() {
            return Err(ShadowmazeError::GenerationFailed(format!(
                "maze is not a spanning tree: {} passages over {} cells",
                maze.open_edge_count(),
                config.cell_count()
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "MazeGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MazeView;

    #[test]
    fn test_generates_perfect_maze() {
        let config = GenerationConfig::new(42);
        let mut rng = create_rng(&config);
        let generator = MazeGenerator::new();
        let maze = generator.generate(&config, &mut rng).unwrap();

        assert_eq!(maze.width, 20);
        assert_eq!(maze.height, 20);
        assert_eq!(maze.open_edge_count(), 399);
        assert!(maze.is_perfect());
        assert!(generator.validate(&maze, &config).is_ok());
        for row in &maze.cells {
            assert!(row.iter().all(|cell| cell.visited));
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let generator = MazeGenerator::new();
        let a = generator.generate_seeded(12, 9, 1234).unwrap();
        let b = generator.generate_seeded(12, 9, 1234).unwrap();
        let c = generator.generate_seeded(12, 9, 4321).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_single_cell_maze() {
        let maze = MazeGenerator::new().generate_seeded(1, 1, 0).unwrap();
        assert_eq!(maze.open_edge_count(), 0);
        assert!(maze.is_perfect());
    }

    #[test]
    fn test_long_thin_maze_does_not_overflow() {
        // A 1-wide strip forces the backtracker to its maximum depth
        let maze = MazeGenerator::new().generate_seeded(1, 5000, 3).unwrap();
        assert!(maze.is_perfect());
    }

    #[test]
    fn test_zero_dimensions_fail() {
        let result = MazeGenerator::new().generate_seeded(0, 10, 1);
        assert!(matches!(result, Err(ShadowmazeError::GenerationFailed(_))));
    }

    #[test]
    fn test_carve_reuses_grid() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::for_testing(8);
        let mut rng = create_rng(&config);
        let mut maze = generator.generate(&config, &mut rng).unwrap();
        let first = maze.clone();

        let opened = generator.carve(&mut maze, &mut rng).unwrap();
        assert_eq!(opened, config.cell_count() - 1);
        assert!(maze.is_perfect());
        assert_ne!(maze, first);
    }

    #[test]
    fn test_custom_start_cell() {
        let generator = MazeGenerator::with_start(Position::new(3, 2));
        let maze = generator.generate_seeded(6, 6, 17).unwrap();
        assert!(maze.is_perfect());

        let outside = MazeGenerator::with_start(Position::new(9, 9));
        assert!(outside.generate_seeded(6, 6, 17).is_err());
    }

    #[test]
    fn test_validate_rejects_cycles() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::for_testing(2);
        let mut maze = generator.generate_seeded(8, 6, 2).unwrap();

        // Any extra opening on a spanning tree closes a cycle
        let extra = (0..8)
            .flat_map(|x| (0..6).map(move |y| Position::new(x, y)))
            .find(|&pos| {
                let right = pos.step(Direction::East);
                maze.is_valid_position(right) && !maze.can_move_between(pos, right)
            })
            .unwrap();
        maze.open_passage(extra, Direction::East.side());

        assert!(generator.validate(&maze, &config).is_err());
    }
}
