//! Game driver: alternates engines over one position until the side to move
//! has no legal action, and records every ply.
//!
//! Forced plies (exactly one legal action) are played without consulting an
//! engine. A game that reaches `max_plies` is recorded as a draw.

use crate::board::{Action, Player};
use crate::error::{Error, Result};
use crate::mcts::{self, SearchContext, UctParams};
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::state::GameState;
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Mcts,
    Minimax,
    Random,
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mcts" | "uct" => Ok(EngineKind::Mcts),
            "minimax" | "alphabeta" | "ab" => Ok(EngineKind::Minimax),
            "random" => Ok(EngineKind::Random),
            other => Err(format!("unknown engine '{other}' (expected mcts, minimax or random)")),
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Mcts => write!(f, "mcts"),
            EngineKind::Minimax => write!(f, "minimax"),
            EngineKind::Random => write!(f, "random"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MatchParams {
    pub games: usize,
    pub max_plies: usize,
    /// Engines for player one and player two.
    pub engines: [EngineKind; 2],
    /// Swap the engines' colours every other game.
    pub alternate_colors: bool,
    pub mcts: UctParams,
    pub minimax: SearchParams,
    pub seed: u64,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            games: 1,
            max_plies: 200,
            engines: [EngineKind::Mcts, EngineKind::Minimax],
            alternate_colors: false,
            mcts: UctParams { movetime: Some(Duration::from_millis(5000)), ..UctParams::default() },
            minimax: SearchParams { depth: 0, movetime: Some(Duration::from_millis(1000)) },
            seed: 42,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlyRecord {
    pub ply: usize,
    pub player: Player,
    /// Engine that chose the action; `None` for forced plies.
    pub engine: Option<EngineKind>,
    pub action: Action,
    pub notation: String,
    /// Minimax score as returned by the search: a win or loss is signed for
    /// the mover, while material scores are always from player two's side.
    pub score: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub engines: [EngineKind; 2],
    pub plies: Vec<PlyRecord>,
    /// `None` when the ply cap was hit.
    pub winner: Option<Player>,
}

impl GameRecord {
    pub fn engine_for(&self, player: Player) -> EngineKind {
        self.engines[player as usize]
    }

    pub fn winning_engine(&self) -> Option<EngineKind> {
        self.winner.map(|p| self.engine_for(p))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub mcts: usize,
    pub minimax: usize,
    pub random: usize,
    pub draws: usize,
}

impl Tally {
    pub fn add(&mut self, game: &GameRecord) {
        match game.winning_engine() {
            Some(EngineKind::Mcts) => self.mcts += 1,
            Some(EngineKind::Minimax) => self.minimax += 1,
            Some(EngineKind::Random) => self.random += 1,
            None => self.draws += 1,
        }
    }
}

fn choose_action(
    state: &GameState,
    engine: EngineKind,
    params: &MatchParams,
    ctx: &mut SearchContext,
) -> Result<(Action, Option<f64>)> {
    match engine {
        EngineKind::Minimax => {
            let res = Searcher::default().search_with_params(state, params.minimax);
            if res.action.is_nil() {
                return Err(Error::NoLegalActions);
            }
            Ok((res.action, Some(res.score)))
        }
        EngineKind::Mcts => {
            let res = mcts::search_with_params(state, params.mcts, ctx)?;
            Ok((res.action, None))
        }
        EngineKind::Random => {
            let mut actions = state.legal_actions();
            if actions.is_empty() {
                return Err(Error::NoLegalActions);
            }
            let i = ctx.rng().gen_range(0..actions.len());
            Ok((actions.swap_remove(i), None))
        }
    }
}

/// Play one game from `start`. `on_ply` sees the position after each ply.
pub fn play_game<F>(
    start: GameState,
    engines: [EngineKind; 2],
    params: &MatchParams,
    ctx: &mut SearchContext,
    mut on_ply: F,
) -> Result<GameRecord>
where
    F: FnMut(&GameState, &PlyRecord),
{
    let mut state = start;
    let mut plies = Vec::new();
    let winner = loop {
        if plies.len() >= params.max_plies {
            warn!("ply cap {} reached, scoring the game as a draw", params.max_plies);
            break None;
        }
        let mut actions = state.legal_actions();
        let player = state.to_move();
        if actions.is_empty() {
            break Some(player.other());
        }
        let (action, engine, score) = if actions.len() == 1 {
            (actions.remove(0), None, None)
        } else {
            let engine = engines[player as usize];
            let (action, score) = choose_action(&state, engine, params, ctx)?;
            (action, Some(engine), score)
        };
        debug!("ply {} {}: {} ({:?})", plies.len(), player, action, engine);
        state.apply_action(&action);
        let record = PlyRecord { ply: plies.len(), player, engine, notation: action.to_string(), action, score };
        on_ply(&state, &record);
        plies.push(record);
    };
    Ok(GameRecord { engines, plies, winner })
}

/// Play `params.games` games from the standard opening with one shared
/// search context, so MCTS statistics carry over between games.
pub fn generate_games<F>(params: &MatchParams, mut on_game: F) -> Result<Vec<GameRecord>>
where
    F: FnMut(usize, &GameRecord),
{
    let mut ctx = SearchContext::new(params.seed);
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let engines = if params.alternate_colors && gi % 2 == 1 {
            [params.engines[1], params.engines[0]]
        } else {
            params.engines
        };
        let game = play_game(GameState::startpos(), engines, params, &mut ctx, |_, _| {})?;
        on_game(gi, &game);
        games.push(game);
    }
    Ok(games)
}

/// One JSON object per line, one line per game.
pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::Io {
        operation: format!("create {}", path.display()),
        source,
    })?;
    let mut w = BufWriter::new(file);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        writeln!(w).map_err(|source| Error::Io { operation: "write game record".into(), source })?;
    }
    w.flush().map_err(|source| Error::Io { operation: "flush game records".into(), source })
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        operation: format!("open {}", path.display()),
        source,
    })?;
    let mut games = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| Error::Io { operation: "read game record".into(), source })?;
        if line.trim().is_empty() { continue; }
        games.push(serde_json::from_str(&line)?);
    }
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_kind_parses() {
        assert_eq!("MCTS".parse::<EngineKind>(), Ok(EngineKind::Mcts));
        assert_eq!("alphabeta".parse::<EngineKind>(), Ok(EngineKind::Minimax));
        assert!("gnubg".parse::<EngineKind>().is_err());
    }

    #[test]
    fn tally_counts_by_engine() {
        let mut t = Tally::default();
        let g = GameRecord { engines: [EngineKind::Mcts, EngineKind::Minimax], plies: vec![], winner: Some(Player::Two) };
        t.add(&g);
        t.add(&GameRecord { winner: None, ..g.clone() });
        assert_eq!(t, Tally { mcts: 0, minimax: 1, random: 0, draws: 1 });
    }
}
