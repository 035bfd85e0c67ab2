//! # Game State Module
//!
//! Central game state: the entity directory for one level and the per-tick
//! orchestration that advances it.
//!
//! A tick runs in a fixed order:
//!
//! 1. timers and abilities
//! 2. player movement, checked against the maze
//! 3. every monster, against one snapshot of the player position
//! 4. the alert flag
//! 5. item pickups and captures
//! 6. the win condition
//!
//! Rendering reads the result afterwards; nothing here draws or plays sound.

use crate::config::GameConfig;
use crate::game::{
    Ability, Collectible, EntityId, Maze, Monster, MonsterState, Player, PositionedActor, WorldPos,
};
use crate::generation::utils::{create_rng, derive_rng};
use crate::generation::{
    CollectiblePlacementGenerator, GenerationConfig, Generator, MazeGenerator,
    MonsterPlacementGenerator,
};
use crate::input::InputSnapshot;
use crate::utils::cell_center;
use crate::{Position, ShadowmazeResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Something that happened during a tick, for sound, effects, and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player picked up an item
    ItemCollected { item: EntityId, remaining: usize },
    /// A visible monster reached the player
    PlayerCaught { monster: EntityId },
    /// The player used an ability
    AbilityActivated { ability: Ability },
    /// A monster switched between patrolling and chasing
    MonsterStateChanged {
        monster: EntityId,
        from: MonsterState,
        to: MonsterState,
    },
    /// A monster started watching the player
    AlertRaised,
    /// The last item was collected
    Victory,
    /// A new level was built
    LevelReset { level: u32, seed: u64 },
}

/// Running totals across levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Ticks simulated
    pub ticks: u64,
    /// Items picked up
    pub items_collected: u32,
    /// Times the player was caught
    pub captures: u32,
    /// Times a monster switched to chasing
    pub chases_started: u32,
    /// Levels won
    pub levels_cleared: u32,
    /// Abilities used
    pub abilities_used: u32,
    /// Alerts raised
    pub alerts: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ItemCollected { .. } => self.items_collected += 1,
            GameEvent::PlayerCaught { .. } => self.captures += 1,
            GameEvent::AbilityActivated { .. } => self.abilities_used += 1,
            GameEvent::MonsterStateChanged {
                to: MonsterState::Chasing,
                ..
            } => self.chases_started += 1,
            GameEvent::AlertRaised => self.alerts += 1,
            GameEvent::Victory => self.levels_cleared += 1,
            _ => {}
        }
    }
}

/// Game completion state for handling endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCompletionState {
    /// Level in progress
    Playing,
    /// Every item collected; the next level starts after a delay
    Victory,
    /// A monster got the player; waits for a restart
    Caught,
}

/// Everything that lives in the current level, plus the orchestration that
/// advances it.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub maze: Maze,
    pub player: Player,
    pub monsters: Vec<Monster>,
    pub collectibles: Vec<Collectible>,
    pub completion_state: GameCompletionState,
    pub statistics: GameStatistics,
    /// Ticks since the game started
    pub tick_number: u64,
    /// 1-based index of the current level
    pub level_number: u32,
    /// Seed the current level was built from
    pub level_seed: u64,
    alert_active: bool,
    victory_timer: f32,
    generator: MazeGenerator,
    /// Master stream; each level seed is drawn from it
    rng: StdRng,
}

impl GameState {
    /// Builds the first level from a validated configuration.
    pub fn new(config: GameConfig) -> ShadowmazeResult<Self> {
        config.validate()?;

        let rng = create_rng(&config.generation);
        let start = cell_center(Position::origin(), config.cell_size);
        let mut state = Self {
            maze: Maze::new(config.generation.maze_width, config.generation.maze_height),
            player: Player::new(start, &config.player),
            monsters: Vec::new(),
            collectibles: Vec::new(),
            completion_state: GameCompletionState::Playing,
            statistics: GameStatistics::new(),
            tick_number: 0,
            level_number: 0,
            level_seed: config.generation.seed,
            alert_active: false,
            victory_timer: 0.0,
            generator: MazeGenerator::new(),
            rng,
            config,
        };
        state.build_level(state.config.generation.seed)?;
        Ok(state)
    }

    /// Starts a fresh level with the next seed from the master stream.
    pub fn reset_level(&mut self) -> ShadowmazeResult<GameEvent> {
        let seed = self.rng.gen();
        self.build_level(seed)
    }

    /// Rebuilds maze, player, monsters, and items from `seed`.
    ///
    /// The maze grid is reused when the dimensions are unchanged.
    pub fn build_level(&mut self, seed: u64) -> ShadowmazeResult<GameEvent> {
        let generation = GenerationConfig {
            seed,
            ..self.config.generation.clone()
        };
        let mut level_rng = StdRng::seed_from_u64(seed);
        let cell_size = self.config.cell_size;

        self.generator
            .regenerate(&mut self.maze, &generation, &mut level_rng)?;

        let spawns = MonsterPlacementGenerator::new(
            self.config.monster.count,
            self.config.monster.spawn_min_distance,
        )
        .generate(&generation, &mut level_rng)?;

        let items = CollectiblePlacementGenerator::new(self.config.collectible_count)
            .avoiding(&spawns)
            .generate(&generation, &mut level_rng)?;

        self.player = Player::new(cell_center(Position::origin(), cell_size), &self.config.player);
        self.monsters = spawns
            .iter()
            .map(|&cell| {
                Monster::new(
                    cell_center(cell, cell_size),
                    &self.config.monster,
                    derive_rng(&mut level_rng),
                )
            })
            .collect();
        self.collectibles = items
            .iter()
            .map(|&cell| Collectible::new(cell_center(cell, cell_size), self.config.collectible_size))
            .collect();

        self.completion_state = GameCompletionState::Playing;
        self.alert_active = false;
        self.victory_timer = 0.0;
        self.level_seed = seed;
        self.level_number += 1;

        info!(
            "Level {} ready (seed {}): {} monsters, {} collectibles",
            self.level_number,
            seed,
            self.monsters.len(),
            self.collectibles.len()
        );

        Ok(GameEvent::LevelReset {
            level: self.level_number,
            seed,
        })
    }

    /// Advances the game by `dt` seconds.
    ///
    /// Negative or non-finite deltas are treated as zero. Only a level
    /// rebuild can fail.
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> ShadowmazeResult<Vec<GameEvent>> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let mut events = Vec::new();
        self.tick_number += 1;
        self.statistics.ticks += 1;

        match self.completion_state {
            GameCompletionState::Playing => self.tick_playing(input, dt, &mut events),
            GameCompletionState::Victory => {
                self.victory_timer -= dt;
                if input.restart || self.victory_timer <= 0.0 {
                    events.push(self.reset_level()?);
                }
            }
            GameCompletionState::Caught => {
                if input.restart {
                    events.push(self.reset_level()?);
                }
            }
        }

        for event in &events {
            self.statistics.update_from_event(event);
        }
        Ok(events)
    }

    fn tick_playing(&mut self, input: &InputSnapshot, dt: f32, events: &mut Vec<GameEvent>) {
        let cell_size = self.config.cell_size;

        self.player.advance_timers(dt);
        if input.boost && self.player.try_activate(Ability::Boost) {
            debug!("Boost activated");
            events.push(GameEvent::AbilityActivated {
                ability: Ability::Boost,
            });
        }
        if input.freeze && self.player.try_activate(Ability::Freeze) {
            let duration = self.config.player.freeze_duration;
            for monster in &mut self.monsters {
                monster.freeze(duration);
            }
            debug!("Froze {} monsters for {:.1}s", self.monsters.len(), duration);
            events.push(GameEvent::AbilityActivated {
                ability: Ability::Freeze,
            });
        }

        let (axis_x, axis_y) = input.axis();
        self.player.step(axis_x, axis_y, dt, &self.maze, cell_size);

        let player_pos = self.player.position;
        for monster in &mut self.monsters {
            let before = monster.state();
            monster.update(dt, player_pos, &self.maze, cell_size);
            if monster.state() != before {
                events.push(GameEvent::MonsterStateChanged {
                    monster: monster.id(),
                    from: before,
                    to: monster.state(),
                });
            }
        }

        let alert = self.monsters.iter().any(|monster| {
            monster.is_visible() && monster.position.distance(player_pos) < monster.detection_range
        });
        if alert && !self.alert_active {
            events.push(GameEvent::AlertRaised);
        }
        self.alert_active = alert;

        let mut remaining = self.remaining_collectibles();
        for item in &mut self.collectibles {
            if item.try_collect(player_pos, self.player.radius) {
                remaining -= 1;
                events.push(GameEvent::ItemCollected {
                    item: item.id,
                    remaining,
                });
            }
        }

        let catcher = self
            .monsters
            .iter()
            .find(|monster| monster.is_visible() && monster.overlaps(&self.player))
            .map(|monster| monster.id());
        if let Some(monster) = catcher {
            debug!("Player caught by monster {}", monster);
            self.completion_state = GameCompletionState::Caught;
            events.push(GameEvent::PlayerCaught { monster });
            return;
        }

        if remaining == 0 {
            info!("Level {} cleared", self.level_number);
            self.completion_state = GameCompletionState::Victory;
            self.victory_timer = self.config.victory_restart_delay;
            events.push(GameEvent::Victory);
        }
    }

    /// Whether any monster is visible and within its detection range.
    pub fn alert_active(&self) -> bool {
        self.alert_active
    }

    /// Checks if the current level has ended.
    pub fn is_game_ended(&self) -> bool {
        self.completion_state != GameCompletionState::Playing
    }

    pub fn completion_state(&self) -> GameCompletionState {
        self.completion_state
    }

    /// Seconds until a won level restarts on its own.
    pub fn victory_time_remaining(&self) -> f32 {
        self.victory_timer.max(0.0)
    }

    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    pub fn player_position(&self) -> WorldPos {
        self.player.position
    }

    /// Items not yet picked up.
    pub fn remaining_collectibles(&self) -> usize {
        self.collectibles
            .iter()
            .filter(|item| !item.is_collected())
            .count()
    }

    pub fn collected_count(&self) -> usize {
        self.collectibles.len() - self.remaining_collectibles()
    }

    /// Monsters the renderer should draw.
    pub fn visible_monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().filter(|monster| monster.is_visible())
    }
}
