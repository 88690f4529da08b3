use criterion::{Criterion, criterion_group, criterion_main};
use minefield_core::{Board, Position, max_mine_count};

fn generate_largest_board(c: &mut Criterion) {
    c.bench_function("generate 26x26 at max mines", |b| {
        b.iter(|| Board::from_seed(26, max_mine_count(26), 42).unwrap())
    });
}

fn flood_fill_largest_board(c: &mut Criterion) {
    let board = Board::with_mine_positions(26, &[]).unwrap();

    c.bench_function("flood fill 26x26 all clear", |b| {
        b.iter(|| board.reveal(Position::new(0, 0)))
    });
}

criterion_group!(benches, generate_largest_board, flood_fill_largest_board);
criterion_main!(benches);
