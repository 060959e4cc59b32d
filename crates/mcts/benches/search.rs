//! Search benchmarks.
//!
//! Run with: `cargo bench -p othello-mcts`
//!
//! Measures full `select_move` calls across iteration budgets, from the
//! opening and from a midgame position, plus the rollout evaluator alone.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use othello_mcts::{LeafEvaluator, Mcts, RolloutEvaluator, SearchConfig};
use othello_rules::{apply_move, legal_moves, Board, Side};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A midgame position reached by deterministic play: always the first
/// legal move, ten plies deep.
fn midgame_position() -> (Board, Side) {
    let mut board = Board::standard_opening();
    let mut side = Side::Black;
    for _ in 0..10 {
        let moves = legal_moves(&board, side);
        if let Some(&cell) = moves.first() {
            board = apply_move(&board, cell, side);
        }
        side = side.opposite();
    }
    (board, side)
}

fn bench_select_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_move");

    for iterations in [10, 50, 200] {
        group.throughput(Throughput::Elements(iterations as u64));

        group.bench_with_input(BenchmarkId::new("opening", iterations), &iterations, |b, &iterations| {
            let board = Board::standard_opening();
            b.iter(|| {
                let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
                let mut engine = Mcts::new(SearchConfig::with_iterations(iterations), evaluator);
                black_box(engine.select_move(&board, Side::Black).unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("midgame", iterations), &iterations, |b, &iterations| {
            let (board, side) = midgame_position();
            b.iter(|| {
                let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
                let mut engine = Mcts::new(SearchConfig::with_iterations(iterations), evaluator);
                black_box(engine.select_move(&board, side).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_rollout(c: &mut Criterion) {
    c.bench_function("rollout_from_opening", |b| {
        let board = Board::standard_opening();
        let mut evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
        b.iter(|| black_box(evaluator.evaluate(&board, Side::Black).unwrap()));
    });
}

criterion_group!(benches, bench_select_move, bench_rollout);
criterion_main!(benches);
