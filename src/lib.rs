//! # Shadowmaze
//!
//! A top-down maze-chase game: the player roams a procedurally generated maze,
//! collects items, and evades monsters that patrol and give chase.
//!
//! ## Architecture Overview
//!
//! The crate is split between a deterministic simulation core and thin
//! presentation glue:
//!
//! - **Generation**: seeded procedural generation of perfect mazes and spawn points
//! - **Spatial queries**: wall collision and line-of-sight over the maze grid
//! - **Monster behavior**: the patrol/chase state machine and its movement strategies
//! - **Game State**: the entity directory and the per-tick orchestration contract
//! - **Rendering / Input**: macroquad drawing and keyboard polling (boundary only)
//!
//! The simulation core never touches macroquad. Everything it needs from the
//! outside world arrives as an [`InputSnapshot`] and a frame delta.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

// Explicit re-exports for commonly used types
pub use config::{GameConfig, MonsterConfig, PlayerConfig};

pub use game::{
    // From collision
    check_wall_collision,
    has_line_of_sight,
    // From entities
    Ability,
    Collectible,
    EntityId,
    Player,
    PositionedActor,
    // From monster
    Monster,
    MonsterState,
    PatrolDirection,
    // From state
    GameCompletionState,
    GameEvent,
    GameState,
    GameStatistics,
    // From strategy
    MovementStrategy,
    // From world
    Cell,
    Maze,
    MazeView,
    Side,
    // Geometry
    Direction,
    Position,
    WorldPos,
};

pub use generation::{
    CollectiblePlacementGenerator, GenerationConfig, Generator, MazeGenerator,
    MonsterPlacementGenerator,
};

pub use scenes::{SceneManager, SceneType};

/// Core error type for the Shadowmaze engine.
#[derive(thiserror::Error, Debug)]
pub enum ShadowmazeError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Shadowmaze codebase.
pub type ShadowmazeResult<T> = Result<T, ShadowmazeError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
