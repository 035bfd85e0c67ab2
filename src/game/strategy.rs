//! # Chase Movement Strategies
//!
//! How a chasing monster turns "the player is over there" into a step.

use serde::{Deserialize, Serialize};

/// Movement policy used while a monster is chasing.
///
/// Patrol movement is the same for every strategy; only the chase step
/// differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementStrategy {
    /// Move straight along the normalised vector to the player and stop
    /// against walls.
    DirectChase,
    /// Follow the shortest corridor route found by A* over the maze cells.
    AStarPath,
    /// Move along the axis with the larger offset first, falling back to the
    /// other axis when blocked.
    #[default]
    AxisPriorityChase,
}

impl MovementStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [MovementStrategy; 3] = [
        MovementStrategy::DirectChase,
        MovementStrategy::AStarPath,
        MovementStrategy::AxisPriorityChase,
    ];

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            MovementStrategy::DirectChase => "direct",
            MovementStrategy::AStarPath => "a-star",
            MovementStrategy::AxisPriorityChase => "axis-priority",
        }
    }
}

impl std::fmt::Display for MovementStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
