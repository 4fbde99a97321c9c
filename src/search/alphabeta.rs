use crate::board::{Action, Player};
use crate::search::eval::{is_terminal_score, TERMINAL_SCORE};
use crate::state::GameState;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Static evaluations are always scored for this player, whichever side the
/// root is maximizing for.
pub const EVAL_PERSPECTIVE: Player = Player::Two;

#[derive(Default, Debug, Clone, Copy)]
pub struct SearchParams {
    /// Deepest iteration to run; 0 leaves depth bounded by `movetime` only.
    pub depth: u32,
    pub movetime: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best root action; nil only when the root has no legal actions.
    pub action: Action,
    /// Backed-up score. Terminal results are signed for the root mover
    /// (maximizing side); static leaves are always scored for
    /// [`EVAL_PERSPECTIVE`], whoever is to move.
    pub score: f64,
    /// Depth of the iteration that produced this result.
    pub depth: u32,
    pub nodes: u64,
}

/// Alpha-beta minimax without move ordering or transposition table.
#[derive(Default, Debug)]
pub struct Searcher {
    pub(crate) nodes: u64,
}

impl Searcher {
    pub fn nodes(&self) -> u64 { self.nodes }

    /// Full-window search to `depth` plies with the root as maximizer.
    pub fn search_depth(&mut self, state: &GameState, depth: u32) -> SearchResult {
        let (action, score) = self.max_value(state, f64::NEG_INFINITY, f64::INFINITY, depth as i32);
        SearchResult { action, score, depth, nodes: self.nodes }
    }

    /// Iterative deepening from depth 1, every iteration from scratch. Stops
    /// once a forced result is proven, the depth cap is reached, or the
    /// movetime has elapsed. The clock is only read between iterations, so
    /// depth 1 always completes.
    pub fn search_with_params(&mut self, state: &GameState, params: SearchParams) -> SearchResult {
        self.nodes = 0;
        let start = Instant::now();
        let max_depth = if params.depth == 0 && params.movetime.is_none() { 1 } else { params.depth };
        let mut res = self.search_depth(state, 1);
        loop {
            debug!("depth {} score {:.2} nodes {} action {}", res.depth, res.score, res.nodes, res.action);
            if is_terminal_score(res.score) { break; }
            if max_depth > 0 && res.depth >= max_depth { break; }
            if let Some(t) = params.movetime { if start.elapsed() >= t { break; } }
            res = self.search_depth(state, res.depth + 1);
        }
        info!("reached depth {} in {:.3}s ({} nodes)", res.depth, start.elapsed().as_secs_f64(), res.nodes);
        res
    }

    /// Maximizing node. With no legal actions the side to move has lost.
    /// Capture chains are always searched through, even past the horizon.
    pub fn max_value(&mut self, state: &GameState, mut alpha: f64, beta: f64, depth: i32) -> (Action, f64) {
        self.nodes += 1;
        let mut actions = state.legal_actions();
        if actions.is_empty() { return (Action::nil(), -TERMINAL_SCORE); }
        if depth <= 0 && !actions[0].is_capture() {
            return (Action::nil(), state.evaluate(EVAL_PERSPECTIVE));
        }
        let mut best = 0usize;
        let mut v = f64::NEG_INFINITY;
        for (i, a) in actions.iter().enumerate() {
            let x = self.min_value(&state.child(a), alpha, beta, depth - 1);
            if x > v { v = x; best = i; }
            if v >= beta { break; }
            alpha = alpha.max(v);
        }
        (actions.swap_remove(best), v)
    }

    /// Minimizing node; mirror of [`Searcher::max_value`].
    pub fn min_value(&mut self, state: &GameState, alpha: f64, mut beta: f64, depth: i32) -> f64 {
        self.nodes += 1;
        let actions = state.legal_actions();
        if actions.is_empty() { return TERMINAL_SCORE; }
        if depth <= 0 && !actions[0].is_capture() {
            return state.evaluate(EVAL_PERSPECTIVE);
        }
        let mut v = f64::INFINITY;
        for a in &actions {
            let (_, x) = self.max_value(&state.child(a), alpha, beta, depth - 1);
            v = v.min(x);
            if v <= alpha { return v; }
            beta = beta.min(v);
        }
        v
    }
}

/// Depth-limited search from `state` with a fresh searcher.
pub fn search(state: &GameState, depth: u32) -> SearchResult {
    Searcher::default().search_depth(state, depth)
}

/// Iterative-deepening search within `movetime`.
pub fn search_deepening(state: &GameState, movetime: Duration) -> SearchResult {
    let params = SearchParams { depth: 0, movetime: Some(movetime) };
    Searcher::default().search_with_params(state, params)
}
