use clap::Parser;
use checkbot::mcts::{self, SearchContext, UctParams};
use checkbot::search::alphabeta::{SearchParams, Searcher};
use checkbot::{Board, GameState, Player};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "checkbot-bench", version, about = "Benchmark CheckBot minimax NPS and MCTS iteration rate")]
struct Args {
    /// Board file (eight rows of glyphs); the standard opening if omitted
    #[arg(long)]
    position: Option<PathBuf>,

    /// Player 2 to move instead of player 1
    #[arg(long, default_value_t = false)]
    player_two: bool,

    /// Movetime in milliseconds (ignored by minimax if depth is set)
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Fixed minimax depth (overrides movetime when > 0)
    #[arg(long, default_value_t = 0)]
    depth: u32,

    /// Fixed MCTS iteration count (overrides movetime when set)
    #[arg(long)]
    iterations: Option<u64>,

    /// Seed for MCTS rollouts
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Skip the MCTS run
    #[arg(long, default_value_t = false)]
    no_mcts: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let board = match &args.position {
        Some(path) => std::fs::read_to_string(path)?.parse::<Board>()?,
        None => Board::startpos(),
    };
    let to_move = if args.player_two { Player::Two } else { Player::One };
    let state = GameState::new(board, to_move);

    let mut p = SearchParams::default();
    if args.depth > 0 { p.depth = args.depth; } else { p.movetime = Some(Duration::from_millis(args.movetime)); }
    let mut s = Searcher::default();
    let t0 = Instant::now();
    let res = s.search_with_params(&state, p);
    let dt = t0.elapsed().as_secs_f64();
    let nps = if dt > 0.0 { res.nodes as f64 / dt } else { 0.0 };
    println!("minimax: action={} score={:.2} depth={} nodes={} elapsed={:.3}s nps={:.1}", res.action, res.score, res.depth, res.nodes, dt, nps);

    if args.no_mcts { return Ok(()); }
    let mut up = UctParams::default();
    match args.iterations {
        Some(n) => up.max_iterations = Some(n),
        None => up.movetime = Some(Duration::from_millis(args.movetime)),
    }
    let mut ctx = SearchContext::new(args.seed);
    let t0 = Instant::now();
    let res = mcts::search_with_params(&state, up, &mut ctx)?;
    let dt = t0.elapsed().as_secs_f64();
    let ips = if dt > 0.0 { res.iterations as f64 / dt } else { 0.0 };
    println!("mcts: action={} iterations={} tree_size={} tree_depth={} elapsed={:.3}s ips={:.1}", res.action, res.iterations, res.tree_size, res.tree_depth, dt, ips);
    Ok(())
}
