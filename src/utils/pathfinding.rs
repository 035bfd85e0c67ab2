//! # Pathfinding Algorithms
//!
//! Grid search over the open passages of a maze, used by monsters that hunt
//! the player along real corridors instead of straight lines.

use crate::game::{MazeView, Position};
use ::pathfinding::prelude::astar;

/// Finds the shortest cell path from `start` to `goal` through open passages.
///
/// The returned path excludes `start` and ends with `goal`; an empty path means
/// the two cells are the same. Returns `None` when either end lies outside the
/// maze or no route exists.
///
/// # Examples
///
/// ```
/// use shadowmaze::{find_cell_path, Maze, Position, Side};
///
/// let mut maze = Maze::new(3, 1);
/// maze.open_passage(Position::new(0, 0), Side::Right);
/// maze.open_passage(Position::new(1, 0), Side::Right);
///
/// let path = find_cell_path(&maze, Position::new(0, 0), Position::new(2, 0)).unwrap();
/// assert_eq!(path, vec![Position::new(1, 0), Position::new(2, 0)]);
/// ```
pub fn find_cell_path<M: MazeView + ?Sized>(
    maze: &M,
    start: Position,
    goal: Position,
) -> Option<Vec<Position>> {
    if !maze.contains(start.x, start.y) || !maze.contains(goal.x, goal.y) {
        return None;
    }

    let (mut path, _cost) = astar(
        &start,
        |&cell| {
            maze.open_neighbors(cell)
                .into_iter()
                .map(|next| (next, 1u32))
        },
        |&cell| cell.manhattan_distance(goal),
        |&cell| cell == goal,
    )?;

    path.remove(0);
    Some(path)
}
