use std::hint::black_box;

use chained_clear_core::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Fully packed board where `(row + col) % kinds` assigns kinds, so only rim tiles can connect.
fn striped(side: Coord, kinds: u16) -> Board {
    let cells: Vec<Option<Kind>> = (0..side)
        .flat_map(|row| (0..side).map(move |col| (row, col)))
        .map(|(row, col)| Some(((u16::from(row) + u16::from(col)) % kinds) as Kind))
        .collect();
    Board::new(TileLayout::from_kinds((side, side), &cells).unwrap())
}

/// Two tiles of one kind on opposite corners of an otherwise empty board.
fn sparse(side: Coord) -> Board {
    let last = side - 1;
    let layout = TileLayout::empty((side, side))
        .and_then(|layout| layout.with_tile((0, 0), Tile::Kind(0)))
        .and_then(|layout| layout.with_tile((last, last), Tile::Kind(0)))
        .unwrap();
    Board::new(layout)
}

fn deadlock_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_matching_pairs");
    for side in [8, 16, 32] {
        let board = striped(side, 7);
        group.bench_with_input(BenchmarkId::new("striped", side), &board, |b, board| {
            b.iter(|| black_box(board).has_matching_pairs())
        });
    }
    group.finish();
}

fn long_connector(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_path");
    for side in [16, 64, 255] {
        let board = sparse(side);
        let last = side - 1;
        group.bench_with_input(BenchmarkId::new("open_board", side), &board, |b, board| {
            b.iter(|| black_box(board).find_path((0, 0), (last, last)))
        });
    }
    group.finish();
}

criterion_group!(benches, deadlock_scan, long_connector);
criterion_main!(benches);
