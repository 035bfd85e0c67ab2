use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shadowmaze::{
    find_cell_path, has_line_of_sight, GameConfig, GameState, InputSnapshot, MazeGenerator,
    Position, WorldPos,
};

fn bench_generation(c: &mut Criterion) {
    let generator = MazeGenerator::new();
    let mut group = c.benchmark_group("maze_generation");
    for size in [20_u32, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| generator.generate_seeded(size, size, black_box(42)))
        });
    }
    group.finish();
}

fn bench_spatial_queries(c: &mut Criterion) {
    let maze = MazeGenerator::new()
        .generate_seeded(20, 20, 42)
        .expect("20x20 maze");

    c.bench_function("line_of_sight_diagonal", |b| {
        b.iter(|| {
            has_line_of_sight(
                &maze,
                25.0,
                black_box(WorldPos::new(12.5, 12.5)),
                black_box(WorldPos::new(487.5, 487.5)),
            )
        })
    });

    c.bench_function("cell_path_corner_to_corner", |b| {
        b.iter(|| {
            find_cell_path(
                &maze,
                black_box(Position::new(0, 0)),
                black_box(Position::new(19, 19)),
            )
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::with_seed(42)).expect("default config is valid");
    let input = InputSnapshot::idle();
    c.bench_function("game_tick", |b| {
        b.iter(|| state.tick(black_box(&input), 1.0 / 60.0))
    });
}

criterion_group!(benches, bench_generation, bench_spatial_queries, bench_tick);
criterion_main!(benches);
