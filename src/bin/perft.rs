use checkbot::perft::{divide, perft};
use checkbot::{Board, GameState, Player};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Perft driver for CheckBot")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Board file (eight rows of glyphs); the standard opening if omitted
    #[arg(long)]
    position: Option<PathBuf>,
    /// Player 2 to move instead of player 1
    #[arg(long, default_value_t = false)]
    player_two: bool,
    /// Print per-action node counts
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let board = match &args.position {
        Some(path) => std::fs::read_to_string(path)?.parse::<Board>()?,
        None => Board::startpos(),
    };
    let to_move = if args.player_two { Player::Two } else { Player::One };
    let state = GameState::new(board, to_move);

    let t0 = Instant::now();
    let nodes = if args.divide && args.depth > 0 {
        let split = divide(&state, args.depth);
        for (action, n) in &split {
            println!("{action}: {n}");
        }
        split.iter().map(|(_, n)| n).sum()
    } else {
        perft(&state, args.depth)
    };
    let dt = t0.elapsed().as_secs_f64();

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
