//! # Item Generation
//!
//! Scatters collectibles over distinct maze cells.

use crate::game::Position;
use crate::generation::utils::all_cells;
use crate::{GenerationConfig, Generator, ShadowmazeError, ShadowmazeResult};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Picks distinct collectible cells.
///
/// The player start is never used. Cells in `avoid` (typically monster
/// spawns) are skipped as long as enough other cells remain.
#[derive(Debug, Clone)]
pub struct CollectiblePlacementGenerator {
    /// Number of collectibles to place
    pub count: usize,
    /// Cell the player spawns in
    pub player_start: Position,
    /// Cells to keep clear when possible
    pub avoid: Vec<Position>,
}

impl CollectiblePlacementGenerator {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            player_start: Position::origin(),
            avoid: Vec::new(),
        }
    }

    /// Also keeps the given cells clear when there is room.
    pub fn avoiding(mut self, cells: &[Position]) -> Self {
        self.avoid.extend_from_slice(cells);
        self
    }
}

impl Generator<Vec<Position>> for CollectiblePlacementGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ShadowmazeResult<Vec<Position>> {
        let open: Vec<Position> = all_cells(config)
            .into_iter()
            .filter(|&cell| cell != self.player_start)
            .collect();

        let preferred: Vec<Position> = open
            .iter()
            .copied()
            .filter(|cell| !self.avoid.contains(cell))
            .collect();
        let candidates = if preferred.len() >= self.count {
            preferred
        } else {
            open
        };

        if candidates.len() < self.count {
            return Err(ShadowmazeError::GenerationFailed(format!(
                "only {} free cells for {} collectibles",
                candidates.len(),
                self.count
            )));
        }

        let cells: Vec<Position> = candidates
            .choose_multiple(rng, self.count)
            .copied()
            .collect();
        debug!("Collectible cells: {:?}", cells);

        self.validate(&cells, config)?;
        Ok(cells)
    }

    fn validate(&self, cells: &Vec<Position>, config: &GenerationConfig) -> ShadowmazeResult<()> {
        if cells.len() != self.count {
            return Err(ShadowmazeError::GenerationFailed(format!(
                "expected {} collectibles, got {}",
                self.count,
                cells.len()
            )));
        }

        let mut seen = HashSet::new();
        for &cell in cells {
            if !config.contains(cell) || cell == self.player_start || !seen.insert(cell) {
                return Err(ShadowmazeError::GenerationFailed(format!(
                    "invalid collectible cell ({}, {})",
                    cell.x, cell.y
                )));
            }
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "CollectiblePlacementGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;

    #[test]
    fn test_cells_are_distinct_and_skip_start() {
        let config = GenerationConfig::for_testing(9);
        let mut rng = create_rng(&config);
        let cells = CollectiblePlacementGenerator::new(10)
            .generate(&config, &mut rng)
            .unwrap();

        assert_eq!(cells.len(), 10);
        let unique: HashSet<_> = cells.iter().collect();
        assert_eq!(unique.len(), 10);
        assert!(!cells.contains(&Position::origin()));
    }

    #[test]
    fn test_avoids_monster_cells() {
        let config = GenerationConfig::with_dimensions(3, 2, 2);
        let mut rng = create_rng(&config);
        let monster = Position::new(1, 1);
        let cells = CollectiblePlacementGenerator::new(2)
            .avoiding(&[monster])
            .generate(&config, &mut rng)
            .unwrap();

        assert_eq!(cells.len(), 2);
        assert!(!cells.contains(&monster));
    }

    #[test]
    fn test_falls_back_when_crowded() {
        let config = GenerationConfig::with_dimensions(3, 2, 2);
        let mut rng = create_rng(&config);
        let cells = CollectiblePlacementGenerator::new(3)
            .avoiding(&[Position::new(1, 1)])
            .generate(&config, &mut rng)
            .unwrap();
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn test_too_many_fails() {
        let config = GenerationConfig::with_dimensions(3, 2, 2);
        let mut rng = create_rng(&config);
        assert!(CollectiblePlacementGenerator::new(4)
            .generate(&config, &mut rng)
            .is_err());
    }
}
