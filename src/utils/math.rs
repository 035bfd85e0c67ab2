//! # Game Mathematics
//!
//! Conversions between continuous world space and maze cells.

use crate::game::{Position, WorldPos};

/// Distances below this are treated as zero.
pub const EPSILON: f32 = 1e-4;

/// Maps one world coordinate to the index of the cell containing it.
///
/// Negative coordinates map to negative indices, so callers can treat them
/// as out of bounds.
///
/// # Examples
///
/// ```
/// use shadowmaze::world_to_cell;
///
/// assert_eq!(world_to_cell(0.0, 25.0), 0);
/// assert_eq!(world_to_cell(24.9, 25.0), 0);
/// assert_eq!(world_to_cell(25.0, 25.0), 1);
/// assert_eq!(world_to_cell(-0.1, 25.0), -1);
/// ```
pub fn world_to_cell(coord: f32, cell_size: f32) -> i32 {
    (coord / cell_size).floor() as i32
}

/// Returns the cell containing a world point.
pub fn cell_of(point: WorldPos, cell_size: f32) -> Position {
    Position::new(
        world_to_cell(point.x, cell_size),
        world_to_cell(point.y, cell_size),
    )
}

/// Returns the world-space centre of a cell.
pub fn cell_center(cell: Position, cell_size: f32) -> WorldPos {
    WorldPos::new(
        (cell.x as f32 + 0.5) * cell_size,
        (cell.y as f32 + 0.5) * cell_size,
    )
}

/// Moves `current` towards `target` by at most `max_step`, never past it.
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}
