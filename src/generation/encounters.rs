//! # Encounter Generation
//!
//! Chooses the cells monsters spawn in, keeping them a fair distance away
//! from where the player starts.

use crate::game::Position;
use crate::generation::utils::all_cells;
use crate::{GenerationConfig, Generator, ShadowmazeError, ShadowmazeResult};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Picks distinct monster spawn cells far from the player start.
///
/// Cells at least `min_distance` (Manhattan) from `player_start` are
/// preferred. If the maze is too small to hold `count` such cells, the
/// distance requirement is relaxed one step at a time; the player start
/// itself is never used.
#[derive(Debug, Clone)]
pub struct MonsterPlacementGenerator {
    /// Number of monsters to place
    pub count: usize,
    /// Preferred minimum Manhattan distance from the player start
    pub min_distance: u32,
    /// Cell the player spawns in
    pub player_start: Position,
}

impl MonsterPlacementGenerator {
    pub fn new(count: usize, min_distance: u32) -> Self {
        Self {
            count,
            min_distance,
            player_start: Position::origin(),
        }
    }

    /// Largest distance requirement, up to `min_distance`, that still leaves
    /// room for every monster.
    fn effective_distance(&self, cells: &[Position]) -> u32 {
        let mut distance = self.min_distance.max(1);
        while distance > 1 {
            let available = cells
                .iter()
                .filter(|cell| cell.manhattan_distance(self.player_start) >= distance)
                .count();
            if available >= self.count {
                break;
            }
            distance -= 1;
        }
        distance
    }
}

impl Generator<Vec<Position>> for MonsterPlacementGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ShadowmazeResult<Vec<Position>> {
        let cells = all_cells(config);
        let distance = self.effective_distance(&cells);
        if distance < self.min_distance {
            warn!(
                "{}x{} maze too small for {} monsters at distance {}, using {}",
                config.maze_width, config.maze_height, self.count, self.min_distance, distance
            );
        }

        let candidates: Vec<Position> = cells
            .into_iter()
            .filter(|cell| cell.manhattan_distance(self.player_start) >= distance)
            .collect();
        if candidates.len() < self.count {
            return Err(ShadowmazeError::GenerationFailed(format!(
                "only {} spawn cells for {} monsters",
                candidates.len(),
                self.count
            )));
        }

        let spawns: Vec<Position> = candidates
            .choose_multiple(rng, self.count)
            .copied()
            .collect();
        debug!("Monster spawns: {:?}", spawns);

        self.validate(&spawns, config)?;
        Ok(spawns)
    }

    fn validate(&self, spawns: &Vec<Position>, config: &GenerationConfig) -> ShadowmazeResult<()> {
        if spawns.len() != self.count {
            return Err(ShadowmazeError::GenerationFailed(format!(
                "expected {} monster spawns, got {}",
                self.count,
                spawns.len()
            )));
        }

        let mut seen = HashSet::new();
        for &spawn in spawns {
            if !config.contains(spawn) {
                return Err(ShadowmazeError::GenerationFailed(format!(
                    "monster spawn ({}, {}) is outside the maze",
                    spawn.x, spawn.y
                )));
            }
            if spawn == self.player_start {
                return Err(ShadowmazeError::GenerationFailed(
                    "monster spawned on the player start".to_string(),
                ));
            }
            if !seen.insert(spawn) {
                return Err(ShadowmazeError::GenerationFailed(format!(
                    "two monsters spawned at ({}, {})",
                    spawn.x, spawn.y
                )));
            }
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "MonsterPlacementGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;

    #[test]
    fn test_spawns_respect_distance() {
        let config = GenerationConfig::new(42);
        let mut rng = create_rng(&config);
        let generator = MonsterPlacementGenerator::new(3, 10);
        let spawns = generator.generate(&config, &mut rng).unwrap();

        assert_eq!(spawns.len(), 3);
        for spawn in &spawns {
            assert!(spawn.manhattan_distance(Position::origin()) >= 10);
        }
    }

    #[test]
    fn test_distance_relaxed_in_small_maze() {
        let config = GenerationConfig::with_dimensions(1, 3, 3);
        let mut rng = create_rng(&config);
        let generator = MonsterPlacementGenerator::new(4, 10);
        let spawns = generator.generate(&config, &mut rng).unwrap();

        assert_eq!(spawns.len(), 4);
        assert!(!spawns.contains(&Position::origin()));
    }

    #[test]
    fn test_too_many_monsters_fails() {
        let config = GenerationConfig::with_dimensions(1, 2, 2);
        let mut rng = create_rng(&config);
        let generator = MonsterPlacementGenerator::new(4, 1);
        assert!(generator.generate(&config, &mut rng).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = GenerationConfig::for_testing(1);
        let generator = MonsterPlacementGenerator::new(2, 1);
        let spawns = vec![Position::new(3, 3), Position::new(3, 3)];
        assert!(generator.validate(&spawns, &config).is_err());
    }

    #[test]
    fn test_no_monsters() {
        let config = GenerationConfig::for_testing(1);
        let mut rng = create_rng(&config);
        let spawns = MonsterPlacementGenerator::new(0, 10)
            .generate(&config, &mut rng)
            .unwrap();
        assert!(spawns.is_empty());
    }
}
