//! # Maze Representation
//!
//! The maze is a rectangular grid of cells, each carrying four independent
//! wall flags. Walls between neighbours are always edited in pairs so the two
//! cells agree on whether the passage between them is open.

use crate::game::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// One side of a cell. The discriminant is the index into [`Cell::walls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    /// All sides in wall-array order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Index into the wall array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The side of the neighbouring cell that faces this one.
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// The grid direction that crosses this side.
    pub fn direction(self) -> Direction {
        match self {
            Side::Top => Direction::North,
            Side::Right => Direction::East,
            Side::Bottom => Direction::South,
            Side::Left => Direction::West,
        }
    }
}

/// A single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Whether the generator has reached this cell
    pub visited: bool,
    /// Wall flags in [`Side`] order: top, right, bottom, left
    pub walls: [bool; 4],
}

impl Cell {
    /// A fully walled, unvisited cell.
    pub const fn closed() -> Self {
        Self {
            visited: false,
            walls: [true; 4],
        }
    }

    /// Whether the wall on the given side is present.
    pub fn has_wall(&self, side: Side) -> bool {
        self.walls[side.index()]
    }

    /// Number of walls still standing around this cell.
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&wall| wall).count()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::closed()
    }
}

/// Read-only view of a maze used by collision, line of sight, and AI.
///
/// Anything that can answer "which walls surround cell (x, y)" can be
/// navigated; coordinates outside the grid answer `None`.
pub trait MazeView {
    /// Width of the grid in cells.
    fn width(&self) -> u32;

    /// Height of the grid in cells.
    fn height(&self) -> u32;

    /// Wall flags of the cell at (x, y), or `None` outside the grid.
    fn walls_at(&self, x: i32, y: i32) -> Option<[bool; 4]>;

    /// Whether (x, y) is a cell of the grid.
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Whether a wall blocks the given side of a cell. Outside the grid
    /// everything is a wall.
    fn has_wall(&self, x: i32, y: i32, side: Side) -> bool {
        self.walls_at(x, y)
            .map(|walls| walls[side.index()])
            .unwrap_or(true)
    }

    /// Whether an actor can pass directly between two adjacent cells.
    ///
    /// Both facing walls must be open; non-adjacent cells never connect.
    fn can_move_between(&self, from: Position, to: Position) -> bool {
        let Some(direction) = Direction::from_delta(to - from) else {
            return false;
        };
        let side = direction.side();
        self.contains(to.x, to.y)
            && !self.has_wall(from.x, from.y, side)
            && !self.has_wall(to.x, to.y, side.opposite())
    }

    /// Cells reachable in one step from `pos`.
    fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .map(|direction| pos.step(direction))
            .filter(|&next| self.can_move_between(pos, next))
            .collect()
    }
}

/// A rectangular maze grid, stored row-major as `cells[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    /// Width of the maze in cells
    pub width: u32,
    /// Height of the maze in cells
    pub height: u32,
    /// 2D grid of cells, indexed as `cells[y][x]`
    pub cells: Vec<Vec<Cell>>,
}

impl Maze {
    /// Creates a maze with every wall standing.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadowmaze::{Maze, Side};
    ///
    /// let maze = Maze::new(4, 3);
    /// assert_eq!(maze.width, 4);
    /// assert!(maze.cell_at(3, 2).unwrap().has_wall(Side::Left));
    /// assert!(maze.cell_at(4, 0).is_none());
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::closed(); width as usize]; height as usize],
        }
    }

    /// Restores every cell to fully walled and unvisited, reusing the grid.
    pub fn reset(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                *cell = Cell::closed();
            }
        }
    }

    /// Checks if a position is inside the maze.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        self.contains(pos.x, pos.y)
    }

    /// Gets the cell at (x, y) if it exists.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells.get(y as usize)?.get(x as usize)
    }

    /// Gets a mutable reference to the cell at (x, y) if it exists.
    pub fn cell_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells.get_mut(y as usize)?.get_mut(x as usize)
    }

    /// Removes the wall on `side` of `pos` together with the matching wall of
    /// the neighbour. Returns false (and changes nothing) if the neighbour
    /// lies outside the maze.
    pub fn open_passage(&mut self, pos: Position, side: Side) -> bool {
        self.set_passage(pos, side, false)
    }

    /// Puts back the wall on `side` of `pos` and the matching neighbour wall.
    pub fn close_passage(&mut self, pos: Position, side: Side) -> bool {
        self.set_passage(pos, side, true)
    }

    fn set_passage(&mut self, pos: Position, side: Side, wall: bool) -> bool {
        let neighbor = pos.step(side.direction());
        if !self.is_valid_position(pos) || !self.is_valid_position(neighbor) {
            return false;
        }
        if let Some(cell) = self.cell_at_mut(pos.x, pos.y) {
            cell.walls[side.index()] = wall;
        }
        if let Some(cell) = self.cell_at_mut(neighbor.x, neighbor.y) {
            cell.walls[side.opposite().index()] = wall;
        }
        true
    }

    /// Counts open passages between adjacent cells, each counted once.
    pub fn open_edge_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let here = Position::new(x, y);
                if self.can_move_between(here, here.step(Direction::East)) {
                    count += 1;
                }
                if self.can_move_between(here, here.step(Direction::South)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of cells reachable from `start` through open passages.
    pub fn reachable_count(&self, start: Position) -> usize {
        if !self.is_valid_position(start) {
            return 0;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for next in self.open_neighbors(pos) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited.len()
    }

    /// Whether every pair of adjacent cells agrees on the wall between them.
    pub fn walls_are_symmetric(&self) -> bool {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                for side in [Side::Right, Side::Bottom] {
                    let neighbor = Position::new(x, y).step(side.direction());
                    if !self.is_valid_position(neighbor) {
                        continue;
                    }
                    if self.has_wall(x, y, side) != self.has_wall(neighbor.x, neighbor.y, side.opposite()) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Whether the open passages form a spanning tree over all cells.
    ///
    /// A connected graph on `n` vertices with exactly `n - 1` edges has no
    /// cycles, so connectivity plus the edge count is sufficient.
    pub fn is_perfect(&self) -> bool {
        let cell_count = self.width as usize * self.height as usize;
        if cell_count == 0 {
            return false;
        }
        self.walls_are_symmetric()
            && self.open_edge_count() == cell_count - 1
            && self.reachable_count(Position::origin()) == cell_count
    }
}

impl MazeView for Maze {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn walls_at(&self, x: i32, y: i32) -> Option<[bool; 4]> {
        self.cell_at(x, y).map(|cell| cell.walls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_maze_is_closed() {
        let maze = Maze::new(3, 2);
        assert_eq!(maze.cells.len(), 2);
        assert_eq!(maze.cells[0].len(), 3);
        for row in &maze.cells {
            for cell in row {
                assert_eq!(cell.wall_count(), 4);
                assert!(!cell.visited);
            }
        }
        assert_eq!(maze.open_edge_count(), 0);
        assert_eq!(maze.reachable_count(Position::origin()), 1);
        assert!(!maze.is_perfect());
    }

    #[test]
    fn test_open_passage_clears_both_sides() {
        let mut maze = Maze::new(3, 3);
        assert!(maze.open_passage(Position::new(1, 1), Side::Right));
        assert!(!maze.has_wall(1, 1, Side::Right));
        assert!(!maze.has_wall(2, 1, Side::Left));
        assert!(maze.walls_are_symmetric());

        assert!(maze.close_passage(Position::new(2, 1), Side::Left));
        assert!(maze.has_wall(1, 1, Side::Right));
        assert!(maze.walls_are_symmetric());
    }

    #[test]
    fn test_open_passage_refuses_border() {
        let mut maze = Maze::new(2, 2);
        assert!(!maze.open_passage(Position::new(0, 0), Side::Top));
        assert!(!maze.open_passage(Position::new(1, 0), Side::Right));
        assert!(maze.has_wall(0, 0, Side::Top));
    }

    #[test]
    fn test_out_of_bounds_is_walled() {
        let maze = Maze::new(2, 2);
        assert!(maze.walls_at(-1, 0).is_none());
        assert!(maze.has_wall(-1, 0, Side::Right));
        assert!(maze.has_wall(5, 5, Side::Top));
        assert!(maze.cell_at(2, 0).is_none());
    }

    #[test]
    fn test_can_move_between() {
        let mut maze = Maze::new(3, 1);
        maze.open_passage(Position::new(0, 0), Side::Right);

        assert!(maze.can_move_between(Position::new(0, 0), Position::new(1, 0)));
        assert!(maze.can_move_between(Position::new(1, 0), Position::new(0, 0)));
        assert!(!maze.can_move_between(Position::new(1, 0), Position::new(2, 0)));
        // Not adjacent
        assert!(!maze.can_move_between(Position::new(0, 0), Position::new(2, 0)));
    }

    #[test]
    fn test_half_open_wall_blocks_movement() {
        let mut maze = Maze::new(2, 1);
        maze.cells[0][0].walls[Side::Right.index()] = false;

        assert!(!maze.walls_are_symmetric());
        assert!(!maze.can_move_between(Position::new(0, 0), Position::new(1, 0)));
    }

    #[test]
    fn test_corridor_is_perfect() {
        let mut maze = Maze::new(4, 1);
        for x in 0..3 {
            maze.open_passage(Position::new(x, 0), Side::Right);
        }
        assert_eq!(maze.open_edge_count(), 3);
        assert!(maze.is_perfect());
    }

    #[test]
    fn test_cycle_is_not_perfect() {
        let mut maze = Maze::new(2, 2);
        maze.open_passage(Position::new(0, 0), Side::Right);
        maze.open_passage(Position::new(0, 0), Side::Bottom);
        maze.open_passage(Position::new(1, 0), Side::Bottom);
        assert!(maze.is_perfect());

        maze.open_passage(Position::new(0, 1), Side::Right);
        assert_eq!(maze.open_edge_count(), 4);
        assert!(!maze.is_perfect());
    }

    #[test]
    fn test_reset_restores_walls_in_place() {
        let mut maze = Maze::new(3, 3);
        maze.open_passage(Position::new(0, 0), Side::Right);
        maze.cells[1][1].visited = true;

        maze.reset();
        assert_eq!(maze, Maze::new(3, 3));
    }

    #[test]
    fn test_side_helpers() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(side.direction().side(), side);
        }
        assert_eq!(Side::Left.index(), 3);
    }
}
