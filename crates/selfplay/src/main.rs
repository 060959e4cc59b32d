//! Self-play corpus generation and engine-vs-engine matches.
//!
//! `generate` plays the search engine against a random opponent and writes
//! every position the games pass through as CSV rows (64 cell codes plus a
//! win/draw/loss label from the engine side's perspective), the input
//! format of the value-network training pipeline. `play` pits two
//! independently configured engines against each other and reports the
//! result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use othello_mcts::{
    BackpropMode, LeafEvaluator, Mcts, RolloutEvaluator, SearchConfig, ValueEvaluator,
};
use othello_rules::{self as rules, Board, Cell, GameResult, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Othello self-play and evaluation tool.
#[derive(Parser)]
#[command(name = "othello-selfplay")]
#[command(about = "Generate self-play training data and run engine matches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate labeled self-play positions for value-network training.
    Generate {
        /// Number of games to generate.
        #[arg(short, long, default_value = "20")]
        games: usize,

        /// Output CSV file.
        #[arg(short, long, default_value = "data/othello_positions.csv")]
        output: PathBuf,

        /// Search iterations per engine move.
        #[arg(short, long, default_value = "50")]
        iterations: usize,

        /// Side played by the engine; the opponent moves at random.
        #[arg(long, value_enum, default_value = "white")]
        side: SideArg,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Use alternating-sign backpropagation instead of the default.
        #[arg(long)]
        alternate_sign: bool,
    },

    /// Play engine-vs-engine matches and report the result.
    Play {
        /// Number of games to play.
        #[arg(short, long, default_value = "1")]
        games: usize,

        /// Search iterations per White move.
        #[arg(long, default_value = "80")]
        white_iterations: usize,

        /// Search iterations per Black move.
        #[arg(long, default_value = "80")]
        black_iterations: usize,

        /// Leaf evaluation strategy for White.
        #[arg(long, value_enum, default_value = "rollout")]
        white_evaluator: EvaluatorKind,

        /// Leaf evaluation strategy for Black.
        #[arg(long, value_enum, default_value = "rollout")]
        black_evaluator: EvaluatorKind,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Use alternating-sign backpropagation instead of the default.
        #[arg(long)]
        alternate_sign: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    White,
    Black,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Side {
        match side {
            SideArg::White => Side::White,
            SideArg::Black => Side::Black,
        }
    }
}

/// Leaf evaluation strategy selectable per engine.
#[derive(Clone, Copy, ValueEnum, Debug)]
enum EvaluatorKind {
    /// Random playouts to the end of the game.
    Rollout,
    /// Disc differential scaled to [-1, 1]; a cheap stand-in for a trained
    /// value network, wired through the same external-value path.
    Material,
}

/// Disc differential for the side to move, scaled into [-1, 1].
fn material_value(board: &Board, to_move: Side) -> f32 {
    let own = board.count(to_move) as f32;
    let opp = board.count(to_move.opposite()) as f32;
    (own - opp) / 64.0
}

fn build_engine(
    kind: EvaluatorKind,
    iterations: usize,
    backprop: BackpropMode,
    seed: u64,
) -> Mcts<Box<dyn LeafEvaluator>> {
    let evaluator: Box<dyn LeafEvaluator> = match kind {
        EvaluatorKind::Rollout => Box::new(RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed))),
        EvaluatorKind::Material => Box::new(ValueEvaluator::new(material_value)),
    };
    let config = SearchConfig::with_iterations(iterations).with_backprop(backprop);
    Mcts::new(config, evaluator)
}

/// All positions one game passed through, each already labeled.
struct GameTrace {
    rows: Vec<Vec<i32>>,
}

/// Encode a board as 64 cell codes (0 empty, 1 white, 2 black) plus the
/// outcome label.
fn encode_row(board: &Board, label: i32) -> Vec<i32> {
    let mut row: Vec<i32> = board
        .cells()
        .map(|(_, piece)| match piece {
            None => 0,
            Some(Side::White) => 1,
            Some(Side::Black) => 2,
        })
        .collect();
    row.push(label);
    row
}

/// Play one self-play game: the engine on `engine_side`, a uniformly
/// random opponent on the other. Records every position a move was played
/// from plus the final one.
fn generate_game(
    game_seed: u64,
    iterations: usize,
    engine_side: Side,
    backprop: BackpropMode,
) -> Result<GameTrace> {
    let mut engine = build_engine(EvaluatorKind::Rollout, iterations, backprop, game_seed);
    let mut opponent_rng = ChaCha8Rng::seed_from_u64(game_seed.wrapping_add(1));

    let mut board = Board::standard_opening();
    let mut turn = Side::Black;
    let mut history = Vec::new();

    while !rules::is_terminal(&board, turn) {
        let chosen: Option<Cell> = if turn == engine_side {
            engine.select_move(&board, turn)?
        } else {
            let moves = rules::legal_moves(&board, turn);
            if moves.is_empty() {
                None
            } else {
                Some(moves[opponent_rng.gen_range(0..moves.len())])
            }
        };

        if let Some(cell) = chosen {
            history.push(board);
            board = rules::apply_move(&board, cell, turn);
        }
        turn = turn.opposite();
    }
    history.push(board);

    let label = match rules::winner(&board) {
        GameResult::Win(side) if side == engine_side => 1,
        GameResult::Win(_) => -1,
        GameResult::Draw => 0,
    };

    Ok(GameTrace {
        rows: history.iter().map(|b| encode_row(b, label)).collect(),
    })
}

fn cmd_generate(
    games: usize,
    output: PathBuf,
    iterations: usize,
    engine_side: Side,
    seed: u64,
    backprop: BackpropMode,
) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {parent:?}"))?;
        }
    }

    println!("Generating {games} games ({iterations} iterations/move, engine plays {engine_side})");
    println!("Output file: {output:?}");
    println!("Seed: {seed}");

    let start = Instant::now();

    let traces: Vec<GameTrace> = (0..games)
        .into_par_iter()
        .map(|i| generate_game(seed.wrapping_add(i as u64 * 1000), iterations, engine_side, backprop))
        .collect::<Result<_>>()?;

    let file = File::create(&output).with_context(|| format!("Failed to create {output:?}"))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for trace in &traces {
        for row in &trace.rows {
            writer
                .write_record(row.iter().map(|v| v.to_string()))
                .context("Failed to write position row")?;
        }
    }
    writer.flush().context("Failed to flush output")?;

    let total_rows: usize = traces.iter().map(|t| t.rows.len()).sum();
    let wins = traces.iter().filter(|t| t.rows[0][64] == 1).count();
    let losses = traces.iter().filter(|t| t.rows[0][64] == -1).count();
    let draws = games - wins - losses;

    println!("\nCompleted in {:.2}s", start.elapsed().as_secs_f64());
    println!("Positions written: {total_rows}");
    println!("Engine record: {wins} wins, {losses} losses, {draws} draws");

    Ok(())
}

/// Tally of a finished match.
struct MatchReport {
    white_wins: usize,
    black_wins: usize,
    draws: usize,
}

/// Play one engine-vs-engine game to completion, Black opening as usual.
fn play_engine_game(
    white: &mut Mcts<Box<dyn LeafEvaluator>>,
    black: &mut Mcts<Box<dyn LeafEvaluator>>,
) -> Result<Board> {
    let mut board = Board::standard_opening();
    let mut turn = Side::Black;

    while !rules::is_terminal(&board, turn) {
        let engine = match turn {
            Side::White => &mut *white,
            Side::Black => &mut *black,
        };
        if let Some(cell) = engine.select_move(&board, turn)? {
            board = rules::apply_move(&board, cell, turn);
        }
        turn = turn.opposite();
    }

    Ok(board)
}

fn run_match(
    games: usize,
    white_iterations: usize,
    black_iterations: usize,
    white_evaluator: EvaluatorKind,
    black_evaluator: EvaluatorKind,
    seed: u64,
    backprop: BackpropMode,
) -> Result<MatchReport> {
    let mut report = MatchReport {
        white_wins: 0,
        black_wins: 0,
        draws: 0,
    };

    for i in 0..games {
        let game_seed = seed.wrapping_add(i as u64 * 1000);
        let mut white = build_engine(white_evaluator, white_iterations, backprop, game_seed);
        let mut black = build_engine(black_evaluator, black_iterations, backprop, game_seed.wrapping_add(500));

        let board = play_engine_game(&mut white, &mut black)?;
        let (w, b) = (board.count(Side::White), board.count(Side::Black));
        match rules::winner(&board) {
            GameResult::Win(Side::White) => report.white_wins += 1,
            GameResult::Win(Side::Black) => report.black_wins += 1,
            GameResult::Draw => report.draws += 1,
        }
        println!("Game {}/{games}: White {w} - {b} Black", i + 1);
    }

    Ok(report)
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            games,
            output,
            iterations,
            side,
            seed,
            alternate_sign,
        } => {
            let backprop = if alternate_sign {
                BackpropMode::AlternateSign
            } else {
                BackpropMode::SameSign
            };
            info!(games, iterations, ?backprop, "starting corpus generation");
            cmd_generate(games, output, iterations, side.into(), seed, backprop)
        }

        Commands::Play {
            games,
            white_iterations,
            black_iterations,
            white_evaluator,
            black_evaluator,
            seed,
            alternate_sign,
        } => {
            let backprop = if alternate_sign {
                BackpropMode::AlternateSign
            } else {
                BackpropMode::SameSign
            };
            info!(games, ?white_evaluator, ?black_evaluator, "starting match");

            let report = run_match(
                games,
                white_iterations,
                black_iterations,
                white_evaluator,
                black_evaluator,
                seed,
                backprop,
            )?;

            println!("\n================================");
            println!("White wins: {}", report.white_wins);
            println!("Black wins: {}", report.black_wins);
            println!("Draws:      {}", report.draws);
            Ok(())
        }
    }
}
