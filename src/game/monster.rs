//! # Monster Behavior
//!
//! Each monster runs a two-state machine, re-evaluated every tick:
//!
//! - **Patrolling**: wander the maze in discrete compass directions, holding
//!   each for a random interval, loosely leashed to the spawn point.
//! - **Chasing**: the player is within detection range and in line of sight;
//!   move towards them using the configured [`MovementStrategy`].
//!
//! A freeze timer sits on top of both states and suspends all logic while it
//! runs.

use crate::config::MonsterConfig;
use crate::game::{
    check_wall_collision, has_line_of_sight, new_entity_id, Direction, EntityId, MazeView,
    MovementStrategy, Position, PositionedActor, WorldPos,
};
use crate::utils::{approach, cell_center, cell_of, find_cell_path, EPSILON};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Behavioral state of a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterState {
    Patrolling,
    Chasing,
}

/// Discrete direction a patrolling monster is walking in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PatrolDirection {
    #[default]
    None,
    Up,
    Right,
    Down,
    Left,
}

impl PatrolDirection {
    /// The four moving directions.
    pub const MOVING: [PatrolDirection; 4] = [
        PatrolDirection::Up,
        PatrolDirection::Right,
        PatrolDirection::Down,
        PatrolDirection::Left,
    ];

    /// Grid direction, or `None` when standing still.
    pub fn to_direction(self) -> Option<Direction> {
        match self {
            PatrolDirection::None => None,
            PatrolDirection::Up => Some(Direction::North),
            PatrolDirection::Right => Some(Direction::East),
            PatrolDirection::Down => Some(Direction::South),
            PatrolDirection::Left => Some(Direction::West),
        }
    }

    /// Unit vector in world space; zero for `None`.
    pub fn unit_vector(self) -> WorldPos {
        self.to_direction()
            .map(Direction::unit_vector)
            .unwrap_or_default()
    }
}

/// A maze monster.
#[derive(Debug, Clone)]
pub struct Monster {
    id: EntityId,
    pub position: WorldPos,
    pub radius: f32,
    pub base_speed: f32,
    pub chase_speed: f32,
    pub detection_range: f32,
    /// Distance under which a patrolling monster is shown
    pub visibility_cutoff: f32,
    pub home: WorldPos,
    pub patrol_radius: f32,
    pub strategy: MovementStrategy,
    current_speed: f32,
    state: MonsterState,
    visible: bool,
    freeze_remaining: f32,
    direction: PatrolDirection,
    direction_timer: f32,
    direction_hold_min: f32,
    direction_hold_max: f32,
    repath_interval: f32,
    repath_timer: f32,
    /// Remaining cells of the current A* route, next waypoint first
    path: Vec<Position>,
    path_target: Option<Position>,
    rng: StdRng,
}

impl Monster {
    /// Creates a patrolling monster whose home is its spawn point.
    pub fn new(position: WorldPos, config: &MonsterConfig, rng: StdRng) -> Self {
        Self {
            id: new_entity_id(),
            position,
            radius: config.radius,
            base_speed: config.base_speed,
            chase_speed: config.chase_speed,
            detection_range: config.detection_range,
            visibility_cutoff: config.visibility_cutoff,
            home: position,
            patrol_radius: config.patrol_radius,
            strategy: config.strategy,
            current_speed: config.base_speed,
            state: MonsterState::Patrolling,
            visible: false,
            freeze_remaining: 0.0,
            direction: PatrolDirection::None,
            direction_timer: 0.0,
            direction_hold_min: config.direction_hold_min,
            direction_hold_max: config.direction_hold_max,
            repath_interval: config.repath_interval,
            repath_timer: 0.0,
            path: Vec::new(),
            path_target: None,
            rng,
        }
    }

    pub fn state(&self) -> MonsterState {
        self.state
    }

    /// Whether the monster should be drawn this frame.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze_remaining > 0.0
    }

    /// Seconds of freeze left.
    pub fn freeze_remaining(&self) -> f32 {
        self.freeze_remaining
    }

    pub fn patrol_direction(&self) -> PatrolDirection {
        self.direction
    }

    /// Seconds until the patrol direction is re-rolled.
    pub fn direction_timer(&self) -> f32 {
        self.direction_timer
    }

    /// Cells of the pending A* route, next waypoint first.
    pub fn planned_path(&self) -> &[Position] {
        &self.path
    }

    /// Freezes the monster for `duration` seconds.
    ///
    /// A freeze never shortens one already running: the remaining time
    /// becomes the larger of the two. Non-positive or NaN durations are
    /// ignored.
    pub fn freeze(&mut self, duration: f32) {
        if !(duration > 0.0) {
            return;
        }
        self.freeze_remaining = self.freeze_remaining.max(duration);
    }

    /// Advances the monster by `dt` seconds.
    ///
    /// While frozen the timer counts down and nothing else happens, including
    /// on the tick the freeze runs out. Otherwise the state is re-evaluated
    /// against the player and the monster moves according to it.
    pub fn update<M: MazeView + ?Sized>(
        &mut self,
        dt: f32,
        player_pos: WorldPos,
        maze: &M,
        cell_size: f32,
    ) {
        if !(dt >= 0.0) || !dt.is_finite() {
            return;
        }

        if self.is_frozen() {
            self.freeze_remaining = (self.freeze_remaining - dt).max(0.0);
            return;
        }

        self.evaluate_state(player_pos, maze, cell_size);

        match self.state {
            MonsterState::Chasing => self.chase(dt, player_pos, maze, cell_size),
            MonsterState::Patrolling => self.patrol(dt, maze, cell_size),
        }
    }

    fn evaluate_state<M: MazeView + ?Sized>(&mut self, player_pos: WorldPos, maze: &M, cell_size: f32) {
        let target_cell = cell_of(player_pos, cell_size);
        let has_target = player_pos.is_finite() && maze.contains(target_cell.x, target_cell.y);

        let distance = self.position.distance(player_pos);
        let sees_player = has_target
            && distance < self.detection_range
            && has_line_of_sight(maze, cell_size, self.position, player_pos);

        let previous = self.state;
        if sees_player {
            self.state = MonsterState::Chasing;
            self.current_speed = self.chase_speed;
            self.visible = true;
        } else {
            self.state = MonsterState::Patrolling;
            self.current_speed = self.base_speed;
            self.visible = has_target && distance < self.visibility_cutoff;
        }

        if previous != self.state {
            debug!(
                "Monster {} {:?} -> {:?} at distance {:.1}",
                self.id, previous, self.state, distance
            );
            self.path.clear();
            self.path_target = None;
            self.repath_timer = 0.0;
            if self.state == MonsterState::Patrolling {
                self.direction_timer = 0.0;
            }
        }
    }

    fn collides<M: MazeView + ?Sized>(&self, maze: &M, cell_size: f32, pos: WorldPos) -> bool {
        check_wall_collision(maze, cell_size, pos, self.radius)
    }

    /// Commits `candidate` if it is clear of walls.
    fn try_move_to<M: MazeView + ?Sized>(&mut self, maze: &M, cell_size: f32, candidate: WorldPos) -> bool {
        if self.collides(maze, cell_size, candidate) {
            return false;
        }
        self.position = candidate;
        true
    }

    fn patrol<M: MazeView + ?Sized>(&mut self, dt: f32, maze: &M, cell_size: f32) {
        let step = self.current_speed * dt;
        // A zero-length probe would report every direction as open
        if step <= 0.0 {
            return;
        }
        self.direction_timer -= dt;

        let blocked = match self.direction {
            PatrolDirection::None => true,
            direction => self.collides(maze, cell_size, self.position + direction.unit_vector() * step),
        };
        if self.direction_timer <= 0.0 || blocked {
            self.pick_patrol_direction(step, maze, cell_size);
        }

        if self.direction == PatrolDirection::None {
            return;
        }
        let candidate = self.position + self.direction.unit_vector() * step;
        if !self.try_move_to(maze, cell_size, candidate) {
            self.direction_timer = 0.0;
        }
    }

    /// Picks uniformly among the unobstructed directions.
    ///
    /// Outside the patrol radius, directions leading further from home are
    /// dropped unless nothing else is open.
    fn pick_patrol_direction<M: MazeView + ?Sized>(&mut self, probe: f32, maze: &M, cell_size: f32) {
        let open: Vec<PatrolDirection> = PatrolDirection::MOVING
            .into_iter()
            .filter(|direction| {
                !self.collides(maze, cell_size, self.position + direction.unit_vector() * probe)
            })
            .collect();

        let to_home = self.home - self.position;
        let leashed: Vec<PatrolDirection> = if to_home.length() > self.patrol_radius {
            open.iter()
                .copied()
                .filter(|direction| {
                    let unit = direction.unit_vector();
                    unit.x * to_home.x + unit.y * to_home.y > 0.0
                })
                .collect()
        } else {
            Vec::new()
        };
        let candidates = if leashed.is_empty() { &open } else { &leashed };

        match candidates.choose(&mut self.rng) {
            Some(&direction) => {
                self.direction = direction;
                self.direction_timer = if self.direction_hold_max > self.direction_hold_min {
                    self.rng.gen_range(self.direction_hold_min..=self.direction_hold_max)
                } else {
                    self.direction_hold_min
                };
                trace!(
                    "Monster {} patrols {:?} for {:.2}s ({} open)",
                    self.id,
                    direction,
                    self.direction_timer,
                    open.len()
                );
            }
            None => {
                self.direction = PatrolDirection::None;
                self.direction_timer = 0.0;
            }
        }
    }

    fn chase<M: MazeView + ?Sized>(&mut self, dt: f32, player_pos: WorldPos, maze: &M, cell_size: f32) {
        let step = self.current_speed * dt;
        if step <= 0.0 {
            return;
        }
        match self.strategy {
            MovementStrategy::AxisPriorityChase => {
                self.axis_priority_step(player_pos, step, maze, cell_size);
            }
            MovementStrategy::DirectChase => {
                self.direct_step(player_pos, step, maze, cell_size);
            }
            MovementStrategy::AStarPath => self.path_step(dt, player_pos, step, maze, cell_size),
        }
    }

    /// Moves along the axis with the larger offset, then the other one if
    /// that is blocked. Axes already aligned with the target are skipped.
    fn axis_priority_step<M: MazeView + ?Sized>(
        &mut self,
        target: WorldPos,
        step: f32,
        maze: &M,
        cell_size: f32,
    ) -> bool {
        let delta = target - self.position;
        let along_x = WorldPos::new(approach(self.position.x, target.x, step), self.position.y);
        let along_y = WorldPos::new(self.position.x, approach(self.position.y, target.y, step));

        let order = if delta.x.abs() >= delta.y.abs() {
            [(delta.x, along_x), (delta.y, along_y)]
        } else {
            [(delta.y, along_y), (delta.x, along_x)]
        };

        order
            .into_iter()
            .filter(|(offset, _)| offset.abs() >= EPSILON)
            .any(|(_, candidate)| self.try_move_to(maze, cell_size, candidate))
    }

    /// Moves straight at the target, holding position if that hits a wall.
    fn direct_step<M: MazeView + ?Sized>(
        &mut self,
        target: WorldPos,
        step: f32,
        maze: &M,
        cell_size: f32,
    ) -> bool {
        let delta = target - self.position;
        let Some(unit) = delta.normalized() else {
            return false;
        };
        let candidate = self.position + unit * step.min(delta.length());
        self.try_move_to(maze, cell_size, candidate)
    }

    /// Follows the cached A* route towards the player's cell.
    fn path_step<M: MazeView + ?Sized>(
        &mut self,
        dt: f32,
        player_pos: WorldPos,
        step: f32,
        maze: &M,
        cell_size: f32,
    ) {
        let here = cell_of(self.position, cell_size);
        let target_cell = cell_of(player_pos, cell_size);

        if here == target_cell {
            self.path.clear();
            if !self.direct_step(player_pos, step, maze, cell_size) {
                self.axis_priority_step(player_pos, step, maze, cell_size);
            }
            return;
        }

        self.repath_timer -= dt;
        let stale = self.repath_timer <= 0.0
            || self.path_target != Some(target_cell)
            || self.path.is_empty();
        if stale {
            self.path = find_cell_path(maze, here, target_cell).unwrap_or_default();
            self.path_target = Some(target_cell);
            self.repath_timer = self.repath_interval;
        }

        let Some(&waypoint_cell) = self.path.first() else {
            return;
        };
        let waypoint = cell_center(waypoint_cell, cell_size);
        if !self.direct_step(waypoint, step, maze, cell_size) {
            self.axis_priority_step(waypoint, step, maze, cell_size);
        }
        if self.position.distance(waypoint) < EPSILON {
            self.path.remove(0);
        }
    }
}

impl PositionedActor for Monster {
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
        self.current_speed
    }
}
