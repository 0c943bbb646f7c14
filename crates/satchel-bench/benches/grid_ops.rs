//! Criterion micro-benchmarks for raw occupancy grid operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use satchel_bench::size_profile;
use satchel_core::{Extent, OwnerId, Position};
use satchel_grid::OccupancyGrid;

/// Build a 64x64 grid with a deterministic checker of 2x2 blocks.
fn checkered_grid() -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(64, 64).unwrap();
    let owner = OwnerId::new(1);
    for y in (0..64).step_by(4) {
        for x in (0..64).step_by(4) {
            grid.stamp(Position::new(x, y), Extent::new(2, 2), owner);
        }
    }
    grid
}

/// Benchmark: fit test at every anchor of a 64x64 checkered grid.
fn bench_fits_sweep(c: &mut Criterion) {
    let grid = checkered_grid();
    let sizes = size_profile(8, 3, 9);

    c.bench_function("fits_sweep_64x64", |b| {
        b.iter(|| {
            for size in &sizes {
                let hits = grid
                    .anchors()
                    .filter(|&a| grid.fits(a, *size, None))
                    .count();
                black_box(hits);
            }
        });
    });
}

/// Benchmark: stamp and erase a 3x3 block across a 64x64 grid.
fn bench_stamp_erase(c: &mut Criterion) {
    let mut grid = OccupancyGrid::new(64, 64).unwrap();
    let owner = OwnerId::new(7);
    let size = Extent::new(3, 3);

    c.bench_function("stamp_erase_64x64", |b| {
        b.iter(|| {
            for y in (0..61).step_by(3) {
                for x in (0..61).step_by(3) {
                    let anchor = Position::new(x, y);
                    grid.stamp(anchor, size, owner);
                    grid.stamp(anchor, size, None);
                }
            }
            black_box(grid.is_clear());
        });
    });
}

criterion_group!(benches, bench_fits_sweep, bench_stamp_erase);
criterion_main!(benches);
