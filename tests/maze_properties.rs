//! Property tests for generated mazes.

use proptest::prelude::*;
use shadowmaze::generation::utils::create_rng;
use shadowmaze::{GenerationConfig, Generator, Maze, MazeGenerator, MazeView, Position, Side};

fn generate(seed: u64, width: u32, height: u32) -> Maze {
    MazeGenerator::new()
        .generate_seeded(width, height, seed)
        .expect("generation succeeds for positive dimensions")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_mazes_are_spanning_trees(seed in any::<u64>(), width in 1_u32..=30, height in 1_u32..=30) {
        let maze = generate(seed, width, height);
        let cells = (width * height) as usize;

        prop_assert_eq!(maze.open_edge_count(), cells - 1);
        prop_assert_eq!(maze.reachable_count(Position::origin()), cells);
        prop_assert!(maze.is_perfect(), "seed={seed} {width}x{height} should be perfect");
    }

    #[test]
    fn walls_agree_across_every_edge(seed in any::<u64>(), width in 1_u32..=25, height in 1_u32..=25) {
        let maze = generate(seed, width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if x + 1 < width as i32 {
                    prop_assert_eq!(
                        maze.has_wall(x, y, Side::Right),
                        maze.has_wall(x + 1, y, Side::Left)
                    );
                }
                if y + 1 < height as i32 {
                    prop_assert_eq!(
                        maze.has_wall(x, y, Side::Bottom),
                        maze.has_wall(x, y + 1, Side::Top)
                    );
                }
            }
        }
    }

    #[test]
    fn outer_border_stays_closed(seed in any::<u64>(), width in 1_u32..=20, height in 1_u32..=20) {
        let maze = generate(seed, width, height);
        for x in 0..width as i32 {
            prop_assert!(maze.has_wall(x, 0, Side::Top));
            prop_assert!(maze.has_wall(x, height as i32 - 1, Side::Bottom));
        }
        for y in 0..height as i32 {
            prop_assert!(maze.has_wall(0, y, Side::Left));
            prop_assert!(maze.has_wall(width as i32 - 1, y, Side::Right));
        }
    }
}

#[test]
fn regenerating_in_place_keeps_the_grid() {
    let generator = MazeGenerator::new();
    let config = GenerationConfig::new(2024);
    let mut rng = create_rng(&config);
    let mut maze = generator.generate(&config, &mut rng).unwrap();

    for _ in 0..5 {
        generator.regenerate(&mut maze, &config, &mut rng).unwrap();
        assert_eq!(maze.cells.len(), 20);
        assert!(maze.is_perfect());
    }
}

#[test]
fn every_cell_is_visited_once_carved() {
    let maze = generate(77, 15, 11);
    assert!(maze.cells.iter().flatten().all(|cell| cell.visited));
    assert!(maze.cells.iter().flatten().all(|cell| cell.wall_count() < 4));
}
