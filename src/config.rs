//! # Game Configuration
//!
//! Tunable parameters for the maze, the player, and the monsters.
//!
//! Every field has a default, so a JSON file only needs to name the values it
//! overrides:
//!
//! ```
//! use shadowmaze::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "cell_size": 32.0 }"#).unwrap();
//! assert_eq!(config.cell_size, 32.0);
//! assert_eq!(config.generation.maze_width, 20);
//! ```

use crate::game::MovementStrategy;
use crate::generation::GenerationConfig;
use crate::{ShadowmazeError, ShadowmazeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Compile-time defaults for every configurable value.
pub mod defaults {
    /// Default maze width in cells
    pub const MAZE_WIDTH: u32 = 20;

    /// Default maze height in cells
    pub const MAZE_HEIGHT: u32 = 20;

    /// Largest maze accepted from a configuration, in cells
    pub const MAX_MAZE_CELLS: usize = 1 << 22;

    /// Side length of one maze cell in world units
    pub const CELL_SIZE: f32 = 25.0;

    /// Player collision radius
    pub const PLAYER_RADIUS: f32 = 10.0;

    /// Player movement speed in world units per second
    pub const PLAYER_SPEED: f32 = 150.0;

    /// Speed multiplier while the boost ability is active
    pub const BOOST_MULTIPLIER: f32 = 2.0;

    /// Seconds the boost lasts
    pub const BOOST_DURATION: f32 = 3.0;

    /// Seconds before boost can be used again
    pub const BOOST_COOLDOWN: f32 = 15.0;

    /// Seconds monsters stay frozen
    pub const FREEZE_DURATION: f32 = 2.0;

    /// Seconds before freeze can be used again
    pub const FREEZE_COOLDOWN: f32 = 20.0;

    /// Number of monsters per level
    pub const MONSTER_COUNT: usize = 3;

    /// Monster collision radius
    pub const MONSTER_RADIUS: f32 = 12.0;

    /// Monster speed while patrolling
    pub const MONSTER_BASE_SPEED: f32 = 80.0;

    /// Monster speed while chasing
    pub const MONSTER_CHASE_SPEED: f32 = 150.0;

    /// Distance under which a monster with line of sight starts chasing
    pub const MONSTER_DETECTION_RANGE: f32 = 200.0;

    /// Distance under which a patrolling monster is drawn
    pub const MONSTER_VISIBILITY_CUTOFF: f32 = 150.0;

    /// Radius around the spawn point that bounds patrol wandering
    pub const MONSTER_PATROL_RADIUS: f32 = 100.0;

    /// Shortest time a patrol direction is held
    pub const DIRECTION_HOLD_MIN: f32 = 0.5;

    /// Longest time a patrol direction is held
    pub const DIRECTION_HOLD_MAX: f32 = 2.0;

    /// Minimum Manhattan distance in cells between the player start and a monster spawn
    pub const MONSTER_SPAWN_MIN_DISTANCE: u32 = 10;

    /// Seconds between A* path recomputations
    pub const REPATH_INTERVAL: f32 = 0.25;

    /// Number of collectibles per level
    pub const COLLECTIBLE_COUNT: usize = 5;

    /// Edge length of a collectible
    pub const COLLECTIBLE_SIZE: f32 = 12.0;

    /// Seconds the victory screen stays up before the next level starts
    pub const VICTORY_RESTART_DELAY: f32 = 3.0;

    /// Frames per second target for the game loop
    pub const TARGET_FPS: u64 = 60;
}

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maze dimensions and seed
    pub generation: GenerationConfig,
    /// Side length of one maze cell in world units
    pub cell_size: f32,
    /// Player tuning
    pub player: PlayerConfig,
    /// Monster tuning
    pub monster: MonsterConfig,
    /// Number of collectibles per level
    pub collectible_count: usize,
    /// Edge length of a collectible
    pub collectible_size: f32,
    /// Seconds before a won level restarts on its own
    pub victory_restart_delay: f32,
}

/// Player movement and ability tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub radius: f32,
    pub speed: f32,
    pub boost_multiplier: f32,
    pub boost_duration: f32,
    pub boost_cooldown: f32,
    pub freeze_duration: f32,
    pub freeze_cooldown: f32,
}

/// Monster perception, speed, and patrol tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    pub count: usize,
    pub radius: f32,
    pub base_speed: f32,
    pub chase_speed: f32,
    pub detection_range: f32,
    pub visibility_cutoff: f32,
    pub patrol_radius: f32,
    pub direction_hold_min: f32,
    pub direction_hold_max: f32,
    pub spawn_min_distance: u32,
    pub strategy: MovementStrategy,
    pub repath_interval: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: defaults::PLAYER_RADIUS,
            speed: defaults::PLAYER_SPEED,
            boost_multiplier: defaults::BOOST_MULTIPLIER,
            boost_duration: defaults::BOOST_DURATION,
            boost_cooldown: defaults::BOOST_COOLDOWN,
            freeze_duration: defaults::FREEZE_DURATION,
            freeze_cooldown: defaults::FREEZE_COOLDOWN,
        }
    }
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            count: defaults::MONSTER_COUNT,
            radius: defaults::MONSTER_RADIUS,
            base_speed: defaults::MONSTER_BASE_SPEED,
            chase_speed: defaults::MONSTER_CHASE_SPEED,
            detection_range: defaults::MONSTER_DETECTION_RANGE,
            visibility_cutoff: defaults::MONSTER_VISIBILITY_CUTOFF,
            patrol_radius: defaults::MONSTER_PATROL_RADIUS,
            direction_hold_min: defaults::DIRECTION_HOLD_MIN,
            direction_hold_max: defaults::DIRECTION_HOLD_MAX,
            spawn_min_distance: defaults::MONSTER_SPAWN_MIN_DISTANCE,
            strategy: MovementStrategy::default(),
            repath_interval: defaults::REPATH_INTERVAL,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            cell_size: defaults::CELL_SIZE,
            player: PlayerConfig::default(),
            monster: MonsterConfig::default(),
            collectible_count: defaults::COLLECTIBLE_COUNT,
            collectible_size: defaults::COLLECTIBLE_SIZE,
            victory_restart_delay: defaults::VICTORY_RESTART_DELAY,
        }
    }
}

impl GameConfig {
    /// Creates the default configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::new(seed),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json_str(json: &str) -> ShadowmazeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file from disk and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> ShadowmazeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> ShadowmazeResult<String> {
        serde_json::to_string_pretty(self).map_err(ShadowmazeError::from)
    }

    /// Side length of the world in world units along x.
    pub fn world_width(&self) -> f32 {
        self.generation.maze_width as f32 * self.cell_size
    }

    /// Side length of the world in world units along y.
    pub fn world_height(&self) -> f32 {
        self.generation.maze_height as f32 * self.cell_size
    }

    /// Checks that the values can produce a playable level.
    ///
    /// Wall collision only inspects the cell containing an actor's centre, so
    /// every radius has to stay below half a cell.
    pub fn validate(&self) -> ShadowmazeResult<()> {
        let invalid = |msg: String| Err(ShadowmazeError::InvalidConfig(msg));

        if self.generation.maze_width == 0 || self.generation.maze_height == 0 {
            return invalid(format!(
                "maze dimensions must be positive, got {}x{}",
                self.generation.maze_width, self.generation.maze_height
            ));
        }
        if !(self.cell_size > 0.0) {
            return invalid(format!("cell_size must be positive, got {}", self.cell_size));
        }

        let half_cell = self.cell_size / 2.0;
        if !(self.player.radius >= 0.0 && self.player.radius < half_cell) {
            return invalid(format!(
                "player radius {} must be in [0, {})",
                self.player.radius, half_cell
            ));
        }
        if !(self.monster.radius >= 0.0 && self.monster.radius < half_cell) {
            return invalid(format!(
                "monster radius {} must be in [0, {})",
                self.monster.radius, half_cell
            ));
        }
        if self.player.speed < 0.0 || self.monster.base_speed < 0.0 || self.monster.chase_speed < 0.0 {
            return invalid("speeds must not be negative".to_string());
        }
        if !(self.monster.direction_hold_min > 0.0
            && self.monster.direction_hold_min <= self.monster.direction_hold_max)
        {
            return invalid(format!(
                "direction hold interval [{}, {}] is empty or non-positive",
                self.monster.direction_hold_min, self.monster.direction_hold_max
            ));
        }

        let cells = self.generation.cell_count();
        if cells > defaults::MAX_MAZE_CELLS {
            return invalid(format!(
                "{}x{} maze exceeds the limit of {} cells",
                self.generation.maze_width,
                self.generation.maze_height,
                defaults::MAX_MAZE_CELLS
            ));
        }

        let free_cells = cells - 1;
        if self.collectible_count > free_cells {
            return invalid(format!(
                "{} collectibles do not fit in {} free cells",
                self.collectible_count, free_cells
            ));
        }
        if self.monster.count > free_cells {
            return invalid(format!(
                "{} monsters do not fit in {} free cells",
                self.monster.count, free_cells
            ));
        }

        Ok(())
    }
}
