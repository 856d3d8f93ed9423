use criterion::{criterion_group, criterion_main, Criterion};
use maze3d::{pathing, Maze, TargetPolicy};

fn bench_cube_maze_5(c: &mut Criterion) {
    c.bench_function("cube_maze_5", |b| {
        b.iter(|| Maze::new(5, 5, 5, TargetPolicy::Corner, false, 12345))
    });
}

fn bench_cube_maze_10_double_routes(c: &mut Criterion) {
    c.bench_function("cube_maze_10_double_routes", |b| {
        b.iter(|| Maze::new(10, 10, 10, TargetPolicy::Anywhere, true, 12345))
    });
}

fn bench_flat_maze_20(c: &mut Criterion) {
    c.bench_function("flat_maze_20", |b| {
        b.iter(|| Maze::new(20, 20, 1, TargetPolicy::Corner, false, 12345))
    });
}

fn bench_largest_maze(c: &mut Criterion) {
    c.bench_function("largest_maze", |b| {
        b.iter(|| Maze::new(20, 20, 20, TargetPolicy::Face, false, 12345))
    });
}

fn bench_distances_largest_maze(c: &mut Criterion) {
    let maze = Maze::new(20, 20, 20, TargetPolicy::Face, false, 12345).unwrap();
    c.bench_function("distances_largest_maze", move |b| {
        b.iter(|| pathing::Distances::new(maze.grid(), maze.target()))
    });
}

criterion_group!(
    benches,
    bench_cube_maze_5,
    bench_cube_maze_10_double_routes,
    bench_flat_maze_20,
    bench_largest_maze,
    bench_distances_largest_maze
);
criterion_main!(benches);
