//! # Actors and Collectibles
//!
//! The player, the items scattered through the maze, and the shared
//! [`PositionedActor`] capability the orchestrator uses for overlap checks.

use crate::config::PlayerConfig;
use crate::game::{check_wall_collision, MazeView, WorldPos};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

/// Anything with a continuous position, a collision radius, and a speed.
pub trait PositionedActor {
    /// Unique identifier.
    fn id(&self) -> EntityId;

    /// Centre of the actor in world space.
    fn position(&self) -> WorldPos;

    /// Collision radius.
    fn radius(&self) -> f32;

    /// Current movement speed in world units per second.
    fn speed(&self) -> f32;

    /// Whether the two actors' circles overlap.
    fn overlaps(&self, other: &dyn PositionedActor) -> bool {
        self.position().distance(other.position()) < self.radius() + other.radius()
    }
}

/// The two cooldown-gated player abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Temporary speed multiplier.
    Boost,
    /// Freezes every monster in place.
    Freeze,
}

impl Ability {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Ability::Boost => "Boost",
            Ability::Freeze => "Freeze",
        }
    }
}

/// The player-controlled actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: EntityId,
    pub position: WorldPos,
    pub radius: f32,
    pub base_speed: f32,
    pub boost_multiplier: f32,
    boost_duration: f32,
    boost_cooldown: f32,
    freeze_cooldown: f32,
    /// Seconds of boost left; zero when not boosted
    boost_remaining: f32,
    boost_cooldown_remaining: f32,
    freeze_cooldown_remaining: f32,
}

impl Player {
    /// Creates a player at `position` tuned by `config`.
    pub fn new(position: WorldPos, config: &PlayerConfig) -> Self {
        Self {
            id: new_entity_id(),
            position,
            radius: config.radius,
            base_speed: config.speed,
            boost_multiplier: config.boost_multiplier,
            boost_duration: config.boost_duration,
            boost_cooldown: config.boost_cooldown,
            freeze_cooldown: config.freeze_cooldown,
            boost_remaining: 0.0,
            boost_cooldown_remaining: 0.0,
            freeze_cooldown_remaining: 0.0,
        }
    }

    /// Whether the boost is currently active.
    pub fn is_boosted(&self) -> bool {
        self.boost_remaining > 0.0
    }

    /// Seconds of boost left.
    pub fn boost_remaining(&self) -> f32 {
        self.boost_remaining
    }

    /// Seconds until the ability can be used again.
    pub fn cooldown_remaining(&self, ability: Ability) -> f32 {
        match ability {
            Ability::Boost => self.boost_cooldown_remaining,
            Ability::Freeze => self.freeze_cooldown_remaining,
        }
    }

    /// Whether the ability is off cooldown.
    pub fn is_ready(&self, ability: Ability) -> bool {
        self.cooldown_remaining(ability) <= 0.0
    }

    /// Starts the ability if it is ready. Returns whether it was activated.
    ///
    /// Activating the freeze only starts its cooldown; applying the freeze to
    /// monsters is up to the caller.
    pub fn try_activate(&mut self, ability: Ability) -> bool {
        if !self.is_ready(ability) {
            return false;
        }
        match ability {
            Ability::Boost => {
                self.boost_remaining = self.boost_duration;
                self.boost_cooldown_remaining = self.boost_cooldown;
            }
            Ability::Freeze => {
                self.freeze_cooldown_remaining = self.freeze_cooldown;
            }
        }
        true
    }

    /// Counts boost and cooldown timers down by `dt`, clamping at zero.
    pub fn advance_timers(&mut self, dt: f32) {
        self.boost_remaining = (self.boost_remaining - dt).max(0.0);
        self.boost_cooldown_remaining = (self.boost_cooldown_remaining - dt).max(0.0);
        self.freeze_cooldown_remaining = (self.freeze_cooldown_remaining - dt).max(0.0);
    }

    /// Moves by `speed * dt` along each pressed axis.
    ///
    /// `axis_x` and `axis_y` are -1, 0 or 1. If the combined move hits a wall
    /// the x-only and then the y-only components are tried, so the player
    /// slides along walls. Returns whether the player moved.
    pub fn step<M: MazeView + ?Sized>(
        &mut self,
        axis_x: f32,
        axis_y: f32,
        dt: f32,
        maze: &M,
        cell_size: f32,
    ) -> bool {
        if axis_x == 0.0 && axis_y == 0.0 {
            return false;
        }

        let distance = self.speed() * dt;
        let full = self.position + WorldPos::new(axis_x, axis_y) * distance;
        let x_only = self.position + WorldPos::new(axis_x * distance, 0.0);
        let y_only = self.position + WorldPos::new(0.0, axis_y * distance);

        for candidate in [full, x_only, y_only] {
            if candidate != self.position
                && !check_wall_collision(maze, cell_size, candidate, self.radius)
            {
                self.position = candidate;
                return true;
            }
        }
        false
    }
}

impl PositionedActor for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> WorldPos {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn speed(&self) -> f32 {
        if self.is_boosted() {
            self.base_speed * self.boost_multiplier
        } else {
            self.base_speed
        }
    }
}

/// An item the player has to pick up to clear the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub position: WorldPos,
    /// Edge length of the item's square
    pub size: f32,
    collected: bool,
}

impl Collectible {
    pub fn new(position: WorldPos, size: f32) -> Self {
        Self {
            id: new_entity_id(),
            position,
            size,
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Collects the item if an actor at `position` with `radius` reaches it.
    ///
    /// Returns true only on the call that actually collects it; a collected
    /// item stays collected.
    pub fn try_collect(&mut self, position: WorldPos, radius: f32) -> bool {
        if self.collected {
            return false;
        }
        if position.distance(self.position) < radius + self.size / 2.0 {
            self.collected = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Maze, Position, Side};

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(WorldPos::new(x, y), &PlayerConfig::default())
    }

    #[test]
    fn test_boost_doubles_speed_until_expiry() {
        let mut player = player_at(12.5, 12.5);
        assert_eq!(player.speed(), 150.0);

        assert!(player.try_activate(Ability::Boost));
        assert!(player.is_boosted());
        assert_eq!(player.speed(), 300.0);

        player.advance_timers(3.0);
        assert!(!player.is_boosted());
        assert_eq!(player.speed(), 150.0);
    }

    #[test]
    fn test_ability_refused_while_cooling_down() {
        let mut player = player_at(12.5, 12.5);
        assert!(player.try_activate(Ability::Freeze));
        assert!(!player.try_activate(Ability::Freeze));
        assert_eq!(player.cooldown_remaining(Ability::Freeze), 20.0);

        player.advance_timers(19.0);
        assert!(!player.is_ready(Ability::Freeze));
        player.advance_timers(5.0);
        assert!(player.is_ready(Ability::Freeze));
        assert_eq!(player.cooldown_remaining(Ability::Freeze), 0.0);
        assert!(player.try_activate(Ability::Freeze));
    }

    #[test]
    fn test_abilities_have_separate_cooldowns() {
        let mut player = player_at(12.5, 12.5);
        assert!(player.try_activate(Ability::Boost));
        assert!(player.is_ready(Ability::Freeze));
        assert!(player.try_activate(Ability::Freeze));
    }

    #[test]
    fn test_step_blocked_by_wall() {
        let maze = Maze::new(2, 2);
        let mut player = player_at(12.5, 12.5);
        // 0.1 s at 150 would push the player 15 units into the right wall
        assert!(!player.step(1.0, 0.0, 0.1, &maze, 25.0));
        assert_eq!(player.position, WorldPos::new(12.5, 12.5));
    }

    #[test]
    fn test_step_slides_along_wall() {
        let mut maze = Maze::new(2, 2);
        maze.open_passage(Position::new(0, 0), Side::Right);
        let mut player = player_at(12.5, 12.5);

        // Down is walled, right is open: the diagonal degrades to x-only
        assert!(player.step(1.0, 1.0, 0.05, &maze, 25.0));
        assert_eq!(player.position, WorldPos::new(20.0, 12.5));
    }

    #[test]
    fn test_collectible_is_monotonic() {
        let mut item = Collectible::new(WorldPos::new(50.0, 50.0), 12.0);
        assert!(!item.try_collect(WorldPos::new(0.0, 0.0), 10.0));
        assert!(item.try_collect(WorldPos::new(40.0, 50.0), 10.0));
        assert!(item.is_collected());
        assert!(!item.try_collect(WorldPos::new(50.0, 50.0), 10.0));
        assert!(item.is_collected());
    }

    #[test]
    fn test_overlap() {
        let a = player_at(0.0, 0.0);
        let b = player_at(19.0, 0.0);
        let c = player_at(20.0, 0.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
