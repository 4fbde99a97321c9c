use anyhow::{Context, Result};
use checkbot::mcts::SearchContext;
use checkbot::selfplay::{play_game, EngineKind, MatchParams};
use checkbot::{Board, GameState, Player};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play one game of checkers between two engines", long_about = None)]
struct Args {
    /// Engine for player 1 (mcts, minimax or random)
    #[arg(long, default_value = "mcts")]
    player_one: EngineKind,

    /// Engine for player 2
    #[arg(long, default_value = "minimax")]
    player_two: EngineKind,

    /// MCTS time per move in milliseconds
    #[arg(long, default_value_t = 5000)]
    mcts_ms: u64,

    /// MCTS iteration cap per move (in addition to the time limit)
    #[arg(long)]
    mcts_iterations: Option<u64>,

    /// Minimax time per move in milliseconds
    #[arg(long, default_value_t = 1000)]
    minimax_ms: u64,

    /// Maximum minimax depth (0 = bounded by time only)
    #[arg(long, default_value_t = 0)]
    depth: u32,

    /// Plies after which the game is scored as a draw
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Seed for MCTS rollouts
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Starting board: eight rows of glyphs (x X o O, space or '.')
    #[arg(long)]
    position: Option<PathBuf>,

    /// Side to move in the starting position (1 or 2)
    #[arg(long, default_value_t = 1)]
    to_move: u8,
}

fn starting_state(args: &Args) -> Result<GameState> {
    let to_move = match args.to_move {
        1 => Player::One,
        2 => Player::Two,
        n => anyhow::bail!("invalid side to move: {n} (use 1 or 2)"),
    };
    let board = match &args.position {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading position from {}", path.display()))?;
            text.parse::<Board>().with_context(|| format!("parsing {}", path.display()))?
        }
        None => Board::startpos(),
    };
    Ok(GameState::new(board, to_move))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut params = MatchParams {
        max_plies: args.max_plies,
        engines: [args.player_one, args.player_two],
        seed: args.seed,
        ..MatchParams::default()
    };
    params.mcts.movetime = Some(Duration::from_millis(args.mcts_ms));
    params.mcts.max_iterations = args.mcts_iterations;
    params.minimax.movetime = Some(Duration::from_millis(args.minimax_ms));
    params.minimax.depth = args.depth;

    let start = starting_state(&args)?;
    println!("{}", start);
    let mut ctx = SearchContext::new(params.seed);
    let game = play_game(start, params.engines, &params, &mut ctx, |state, ply| {
        let who = match ply.engine {
            Some(e) => e.to_string(),
            None => "forced".to_string(),
        };
        match ply.score {
            Some(score) => println!("{}. {} ({}, score {:.2}): {}", ply.ply + 1, ply.player, who, score, ply.notation),
            None => println!("{}. {} ({}): {}", ply.ply + 1, ply.player, who, ply.notation),
        }
        println!("{}", state);
    })?;

    match game.winner {
        Some(p) => println!("{} ({}) wins after {} plies", p, game.engine_for(p), game.plies.len()),
        None => println!("Draw after {} plies", game.plies.len()),
    }
    Ok(())
}
