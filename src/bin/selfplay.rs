use checkbot::selfplay::{generate_games, write_jsonl, EngineKind, MatchParams, Tally};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "checkbot-selfplay", about = "Play a series of engine-vs-engine games and write them as JSONL")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value = "mcts")]
    player_one: EngineKind,
    #[arg(long, default_value = "minimax")]
    player_two: EngineKind,
    /// Swap colours every other game
    #[arg(long, default_value_t = false)]
    alternate: bool,
    #[arg(long, default_value_t = 5000)]
    mcts_ms: u64,
    #[arg(long)]
    mcts_iterations: Option<u64>,
    #[arg(long, default_value_t = 1000)]
    minimax_ms: u64,
    #[arg(long, default_value_t = 0)]
    depth: u32,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "out/games.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let mut params = MatchParams {
        games: a.games,
        max_plies: a.max_plies,
        engines: [a.player_one, a.player_two],
        alternate_colors: a.alternate,
        seed: a.seed,
        ..MatchParams::default()
    };
    params.mcts.movetime = Some(Duration::from_millis(a.mcts_ms));
    params.mcts.max_iterations = a.mcts_iterations;
    params.minimax.movetime = Some(Duration::from_millis(a.minimax_ms));
    params.minimax.depth = a.depth;

    eprintln!("Playing {} games ({} vs {}, max_plies={})", a.games, a.player_one, a.player_two, a.max_plies);
    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")?
            .progress_chars("=>-"),
    );
    let mut tally = Tally::default();
    let games = generate_games(&params, |_, game| {
        tally.add(game);
        pb.set_message(format!("mcts {} minimax {} random {} draws {}", tally.mcts, tally.minimax, tally.random, tally.draws));
        pb.inc(1);
    })?;
    pb.finish();

    if let Some(dir) = a.out.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    write_jsonl(&games, &a.out)?;
    eprintln!("Wrote {} games to {}", games.len(), a.out.display());
    println!("{}", serde_json::to_string(&tally)?);
    Ok(())
}
