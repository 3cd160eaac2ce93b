use criterion::{criterion_group, criterion_main, Criterion};
use backtracker_mazes::{
    generators,
    grid::Grid,
    observers::NullObserver,
    units::{ColumnLength, RowLength},
};

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut g = Grid::new(RowLength(32), ColumnLength(32)).unwrap();
    let mut rng = generators::seeded_rng(32);
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| {
            g.reset();
            generators::recursive_backtracker(&mut g, &mut rng, NullObserver)
        })
    });
}

fn bench_recursive_backtracker_maze_200(c: &mut Criterion) {
    let mut g = Grid::new(RowLength(200), ColumnLength(200)).unwrap();
    let mut rng = generators::seeded_rng(200);
    c.bench_function("recursive_backtracker_maze_200", move |b| {
        b.iter(|| {
            g.reset();
            generators::recursive_backtracker(&mut g, &mut rng, NullObserver)
        })
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_200
);
criterion_main!(benches);
