//! End-to-end games driven by the search engine.

use othello_mcts::{BackpropMode, Mcts, RolloutEvaluator, SearchConfig};
use othello_rules::{
    apply_move, is_terminal, legal_moves, winner, Board, GameResult, Side,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn rollout_engine(seed: u64, iterations: usize, backprop: BackpropMode) -> Mcts<RolloutEvaluator<ChaCha8Rng>> {
    let config = SearchConfig::with_iterations(iterations).with_backprop(backprop);
    Mcts::new(config, RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed)))
}

/// Play one full game, White driven by `white` and Black by `black`;
/// both closures map a position to a chosen move (None = pass).
fn play_game(
    mut white: impl FnMut(&Board) -> Option<othello_rules::Cell>,
    mut black: impl FnMut(&Board) -> Option<othello_rules::Cell>,
) -> Board {
    let mut board = Board::standard_opening();
    let mut turn = Side::Black;
    let mut plies = 0;

    while !is_terminal(&board, turn) {
        let chosen = match turn {
            Side::White => white(&board),
            Side::Black => black(&board),
        };
        if let Some(cell) = chosen {
            assert!(
                legal_moves(&board, turn).contains(&cell),
                "{turn} chose illegal move {cell} on\n{board}"
            );
            board = apply_move(&board, cell, turn);
        } else {
            assert!(legal_moves(&board, turn).is_empty());
        }
        turn = turn.opposite();

        plies += 1;
        assert!(plies < 200, "game failed to terminate");
    }

    board
}

#[test]
fn test_engine_vs_engine_game_runs_to_completion() {
    let mut white = rollout_engine(1, 30, BackpropMode::SameSign);
    let mut black = rollout_engine(2, 30, BackpropMode::SameSign);

    let board = play_game(
        |b| white.select_move(b, Side::White).unwrap(),
        |b| black.select_move(b, Side::Black).unwrap(),
    );

    let pieces = board.count(Side::White) + board.count(Side::Black);
    assert!(pieces > 4 && pieces <= 64);
    assert!(is_terminal(&board, Side::White));
}

#[test]
fn test_alternating_sign_engine_beats_random_play() {
    let mut engine_wins = 0;
    let mut random_wins = 0;

    for seed in 0..5u64 {
        let mut engine = rollout_engine(seed, 80, BackpropMode::AlternateSign);
        let mut rng = ChaCha8Rng::seed_from_u64(seed + 1000);

        let board = play_game(
            // Random opponent as White.
            |b| {
                let moves = legal_moves(b, Side::White);
                if moves.is_empty() {
                    None
                } else {
                    Some(moves[rng.gen_range(0..moves.len())])
                }
            },
            // Engine as Black.
            |b| engine.select_move(b, Side::Black).unwrap(),
        );

        match winner(&board) {
            GameResult::Win(Side::Black) => engine_wins += 1,
            GameResult::Win(Side::White) => random_wins += 1,
            GameResult::Draw => {}
        }
    }

    assert!(
        engine_wins > random_wins,
        "engine won {engine_wins} of 5 games against random play ({random_wins} losses)"
    );
}

#[test]
fn test_opening_move_is_one_of_the_four_legal_replies() {
    let board = Board::standard_opening();
    let openings = legal_moves(&board, Side::Black);
    assert_eq!(openings.len(), 4);

    for iterations in [1, 100] {
        let mut engine = rollout_engine(42, iterations, BackpropMode::SameSign);
        let chosen = engine.select_move(&board, Side::Black).unwrap().unwrap();
        assert!(openings.contains(&chosen));
    }
}
