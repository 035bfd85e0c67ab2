//! # Spatial Collision
//!
//! Pure geometric queries against the maze walls: whether a circular actor
//! overlaps a wall of its cell, and whether a straight segment between two
//! world points crosses any wall.

use crate::game::{Direction, MazeView, Position, Side, WorldPos};
use crate::utils::{cell_of, EPSILON};

/// Checks whether a circle of `radius` centred at `pos` touches a wall.
///
/// Only the cell containing the centre is inspected: each of its four walled
/// sides rejects the circle if the circle reaches past that side's boundary
/// line. Points outside the grid, or non-finite points, always collide.
///
/// This is an approximation that assumes `radius < cell_size / 2`; a fatter
/// actor may overlap a wall of a neighbouring cell without being reported.
///
/// # Examples
///
/// ```
/// use shadowmaze::{check_wall_collision, Maze, WorldPos};
///
/// let maze = Maze::new(2, 2);
/// assert!(!check_wall_collision(&maze, 25.0, WorldPos::new(12.5, 12.5), 10.0));
/// assert!(check_wall_collision(&maze, 25.0, WorldPos::new(12.5, 3.0), 10.0));
/// assert!(check_wall_collision(&maze, 25.0, WorldPos::new(-1.0, 12.5), 1.0));
/// ```
pub fn check_wall_collision<M: MazeView + ?Sized>(
    maze: &M,
    cell_size: f32,
    pos: WorldPos,
    radius: f32,
) -> bool {
    if !pos.is_finite() {
        return true;
    }

    let cell = cell_of(pos, cell_size);
    let Some(walls) = maze.walls_at(cell.x, cell.y) else {
        return true;
    };

    let left = cell.x as f32 * cell_size;
    let top = cell.y as f32 * cell_size;
    let right = left + cell_size;
    let bottom = top + cell_size;

    (walls[Side::Top.index()] && pos.y - radius < top)
        || (walls[Side::Right.index()] && pos.x + radius > right)
        || (walls[Side::Bottom.index()] && pos.y + radius > bottom)
        || (walls[Side::Left.index()] && pos.x - radius < left)
}

/// Whether stepping from `cell` one cell in `direction` crosses a wall.
///
/// Leaving the grid counts as blocked, and either facing wall blocks.
fn crossing_blocked<M: MazeView + ?Sized>(maze: &M, cell: Position, direction: Direction) -> bool {
    let next = cell.step(direction);
    let side = direction.side();
    !maze.contains(next.x, next.y)
        || maze.has_wall(cell.x, cell.y, side)
        || maze.has_wall(next.x, next.y, side.opposite())
}

/// Checks whether the straight segment from `from` to `to` is free of walls.
///
/// The segment is walked cell by cell with a DDA. Every cell boundary it
/// crosses is tested against the wall flags on both sides; the walk fails on
/// the first walled crossing or as soon as it would leave the grid. When the
/// segment passes exactly through a grid corner, the crossing is blocked if
/// either way round the corner is walled, which keeps the answer the same in
/// both directions.
///
/// Segments shorter than [`EPSILON`] always have line of sight.
///
/// # Examples
///
/// ```
/// use shadowmaze::{has_line_of_sight, Maze, Position, Side, WorldPos};
///
/// let mut maze = Maze::new(3, 1);
/// maze.open_passage(Position::new(0, 0), Side::Right);
///
/// let a = WorldPos::new(5.0, 5.0);
/// let b = WorldPos::new(15.0, 5.0);
/// let c = WorldPos::new(25.0, 5.0);
/// assert!(has_line_of_sight(&maze, 10.0, a, b));
/// assert!(!has_line_of_sight(&maze, 10.0, a, c));
/// ```
pub fn has_line_of_sight<M: MazeView + ?Sized>(
    maze: &M,
    cell_size: f32,
    from: WorldPos,
    to: WorldPos,
) -> bool {
    if from.distance(to) < EPSILON {
        return true;
    }
    if !from.is_finite() || !to.is_finite() || !(cell_size > 0.0) {
        return false;
    }

    let start = cell_of(from, cell_size);
    let end = cell_of(to, cell_size);
    if !maze.contains(start.x, start.y) {
        return false;
    }

    let cs = f64::from(cell_size);
    let (sx, sy) = (f64::from(from.x), f64::from(from.y));
    let dx = f64::from(to.x) - sx;
    let dy = f64::from(to.y) - sy;

    let (step_x, x_direction) = if dx >= 0.0 {
        (1, Direction::East)
    } else {
        (-1, Direction::West)
    };
    let (step_y, y_direction) = if dy >= 0.0 {
        (1, Direction::South)
    } else {
        (-1, Direction::North)
    };

    // Parametric distance along the segment to the first boundary on each axis
    let first_boundary = |origin: f64, cell: i32, delta: f64| -> f64 {
        if delta > 0.0 {
            ((f64::from(cell) + 1.0) * cs - origin) / delta
        } else if delta < 0.0 {
            (f64::from(cell) * cs - origin) / delta
        } else {
            f64::INFINITY
        }
    };
    let mut t_max_x = first_boundary(sx, start.x, dx);
    let mut t_max_y = first_boundary(sy, start.y, dy);
    let t_delta_x = if dx != 0.0 { cs / dx.abs() } else { f64::INFINITY };
    let t_delta_y = if dy != 0.0 { cs / dy.abs() } else { f64::INFINITY };

    let mut remaining_x = start.x.abs_diff(end.x);
    let mut remaining_y = start.y.abs_diff(end.y);
    let mut cell = start;

    while remaining_x > 0 || remaining_y > 0 {
        let corner = remaining_x > 0
            && remaining_y > 0
            && (t_max_x - t_max_y).abs() <= 1e-9 * t_max_x.abs().max(1.0);

        if corner {
            let via_x = crossing_blocked(maze, cell, x_direction)
                || crossing_blocked(maze, cell.step(x_direction), y_direction);
            let via_y = crossing_blocked(maze, cell, y_direction)
                || crossing_blocked(maze, cell.step(y_direction), x_direction);
            if via_x || via_y {
                return false;
            }
            cell = Position::new(cell.x + step_x, cell.y + step_y);
            t_max_x += t_delta_x;
            t_max_y += t_delta_y;
            remaining_x -= 1;
            remaining_y -= 1;
        } else if remaining_x > 0 && (remaining_y == 0 || t_max_x < t_max_y) {
            if crossing_blocked(maze, cell, x_direction) {
                return false;
            }
            cell = cell.step(x_direction);
            t_max_x += t_delta_x;
            remaining_x -= 1;
        } else {
            if crossing_blocked(maze, cell, y_direction) {
                return false;
            }
            cell = cell.step(y_direction);
            t_max_y += t_delta_y;
            remaining_y -= 1;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Maze;

    const CELL: f32 = 25.0;

    fn open_grid(width: u32, height: u32) -> Maze {
        let mut maze = Maze::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                maze.open_passage(Position::new(x, y), Side::Right);
                maze.open_passage(Position::new(x, y), Side::Bottom);
            }
        }
        maze
    }

    #[test]
    fn test_centre_of_closed_cell_is_free() {
        let maze = Maze::new(3, 3);
        assert!(!check_wall_collision(&maze, CELL, WorldPos::new(37.5, 37.5), 10.0));
    }

    #[test]
    fn test_each_walled_side_collides() {
        let maze = Maze::new(3, 3);
        let r = 10.0;
        assert!(check_wall_collision(&maze, CELL, WorldPos::new(37.5, 34.0), r));
        assert!(check_wall_collision(&maze, CELL, WorldPos::new(41.0, 37.5), r));
        assert!(check_wall_collision(&maze, CELL, WorldPos::new(37.5, 41.0), r));
        assert!(check_wall_collision(&maze, CELL, WorldPos::new(34.0, 37.5), r));
    }

    #[test]
    fn test_touching_boundary_exactly_is_not_collision() {
        let maze = Maze::new(1, 1);
        // x - r == left exactly; the comparison is strict
        assert!(!check_wall_collision(&maze, CELL, WorldPos::new(10.0, 12.5), 10.0));
    }

    #[test]
    fn test_open_side_allows_overlap() {
        let mut maze = Maze::new(2, 1);
        maze.open_passage(Position::new(0, 0), Side::Right);
        assert!(!check_wall_collision(&maze, CELL, WorldPos::new(22.0, 12.5), 10.0));
        assert!(check_wall_collision(&maze, CELL, WorldPos::new(2.0, 12.5), 10.0));
    }

    #[test]
    fn test_outside_grid_and_nan_collide() {
        let maze = open_grid(2, 2);
        assert!(check_wall_collision(&maze, CELL, WorldPos::new(50.0, 10.0), 0.0));
        assert!(check_wall_collision(&maze, CELL, WorldPos::new(10.0, -0.5), 0.0));
        assert!(check_wall_collision(&maze, CELL, WorldPos::new(f32::NAN, 10.0), 0.0));
    }

    #[test]
    fn test_los_same_point() {
        let maze = Maze::new(1, 1);
        let p = WorldPos::new(5.0, 5.0);
        assert!(has_line_of_sight(&maze, CELL, p, p));
    }

    #[test]
    fn test_los_degenerate_outside_grid() {
        let maze = Maze::new(1, 1);
        let p = WorldPos::new(-50.0, -50.0);
        assert!(has_line_of_sight(&maze, CELL, p, p));
    }

    #[test]
    fn test_los_within_one_cell() {
        let maze = Maze::new(2, 2);
        assert!(has_line_of_sight(
            &maze,
            CELL,
            WorldPos::new(2.0, 2.0),
            WorldPos::new(23.0, 20.0)
        ));
    }

    #[test]
    fn test_los_blocked_by_wall() {
        let maze = Maze::new(2, 1);
        assert!(!has_line_of_sight(
            &maze,
            CELL,
            WorldPos::new(12.5, 12.5),
            WorldPos::new(37.5, 12.5)
        ));
    }

    #[test]
    fn test_los_half_wall_blocks_both_ways() {
        let mut maze = Maze::new(2, 1);
        maze.cells[0][0].walls[Side::Right.index()] = false;
        let a = WorldPos::new(12.5, 12.5);
        let b = WorldPos::new(37.5, 12.5);
        assert!(!has_line_of_sight(&maze, CELL, a, b));
        assert!(!has_line_of_sight(&maze, CELL, b, a));
    }

    #[test]
    fn test_los_long_corridor() {
        let mut maze = Maze::new(6, 1);
        for x in 0..5 {
            maze.open_passage(Position::new(x, 0), Side::Right);
        }
        let a = WorldPos::new(3.0, 12.5);
        let b = WorldPos::new(147.0, 12.5);
        assert!(has_line_of_sight(&maze, CELL, a, b));
        assert!(has_line_of_sight(&maze, CELL, b, a));
    }

    #[test]
    fn test_los_diagonal_in_open_grid() {
        let maze = open_grid(4, 4);
        assert!(has_line_of_sight(
            &maze,
            CELL,
            WorldPos::new(5.0, 7.0),
            WorldPos::new(93.0, 81.0)
        ));
    }

    #[test]
    fn test_los_leaving_grid_is_blocked() {
        let maze = open_grid(2, 2);
        assert!(!has_line_of_sight(
            &maze,
            CELL,
            WorldPos::new(12.5, 12.5),
            WorldPos::new(60.0, 12.5)
        ));
        assert!(!has_line_of_sight(
            &maze,
            CELL,
            WorldPos::new(-5.0, 12.5),
            WorldPos::new(12.5, 12.5)
        ));
    }

    #[test]
    fn test_los_exact_corner_needs_both_detours() {
        // 2x2 with only the L-shaped route (0,0)->(1,0)->(1,1) open
        let mut maze = Maze::new(2, 2);
        maze.open_passage(Position::new(0, 0), Side::Right);
        maze.open_passage(Position::new(1, 0), Side::Bottom);

        let a = WorldPos::new(12.5, 12.5);
        let b = WorldPos::new(37.5, 37.5);
        assert!(!has_line_of_sight(&maze, CELL, a, b));
        assert!(!has_line_of_sight(&maze, CELL, b, a));

        maze.open_passage(Position::new(0, 0), Side::Bottom);
        maze.open_passage(Position::new(0, 1), Side::Right);
        assert!(has_line_of_sight(&maze, CELL, a, b));
        assert!(has_line_of_sight(&maze, CELL, b, a));
    }
}
