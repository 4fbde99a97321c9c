//! UCT Monte Carlo tree search.
//!
//! Each iteration selects a leaf with UCB1 (expanding the first node that
//! still has unexpanded actions), plays a uniformly random game from it, and
//! backs the result up to the root, flipping its sign at every level. When
//! the budget is spent, the tree's statistics are merged into the caller's
//! [`StatisticsStore`] so the next search over the same positions starts warm.

pub mod context;
pub mod store;
pub mod tree;

pub use context::SearchContext;
pub use store::{NodeStats, StatisticsStore};
pub use tree::{Node, NodeId, Tree, ROOT};

use crate::board::Action;
use crate::error::{Error, Result};
use crate::state::GameState;
use log::{debug, info};
use rand::Rng;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// UCB1 exploration constant, 1/sqrt(2).
pub const C_P: f64 = std::f64::consts::FRAC_1_SQRT_2;

#[derive(Debug, Clone, Copy)]
pub struct UctParams {
    pub movetime: Option<Duration>,
    pub max_iterations: Option<u64>,
    pub exploration: f64,
}

impl Default for UctParams {
    fn default() -> Self {
        Self { movetime: None, max_iterations: None, exploration: C_P }
    }
}

#[derive(Debug, Clone)]
pub struct UctResult {
    pub action: Action,
    pub iterations: u64,
    /// Root visits at the end of the search, stored visits included.
    pub root_visits: u32,
    pub tree_size: usize,
    pub tree_depth: usize,
}

/// UCB1 score of `child` under a parent visited `parent_visits` times.
pub fn uct_score(parent_visits: u32, child: &Node, c: f64) -> f64 {
    child.avg_reward + c * (2.0 * (parent_visits as f64).ln() / child.visit_count as f64).sqrt()
}

/// Child of `id` with the highest UCB1 score; ties keep the earliest child.
///
/// With `visited`, children whose position already appears on the current
/// iteration's path are skipped. If that leaves nothing, their marks are
/// dropped and the choice is made among all children.
pub fn best_child(tree: &Tree, id: NodeId, c: f64, visited: Option<&mut HashSet<GameState>>) -> Result<NodeId> {
    let node = tree.node(id);
    if node.children.is_empty() {
        return Err(Error::NoChildren { node: id });
    }
    let pick = |exclude: Option<&HashSet<GameState>>| -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &ch in &node.children {
            let child = tree.node(ch);
            if exclude.map_or(false, |v| v.contains(&child.state)) { continue; }
            let score = uct_score(node.visit_count, child, c);
            if best.map_or(true, |(_, bs)| score > bs) { best = Some((ch, score)); }
        }
        best.map(|(ch, _)| ch)
    };
    if let Some(visited) = visited {
        if let Some(ch) = pick(Some(&*visited)) {
            return Ok(ch);
        }
        for &ch in &node.children {
            visited.remove(&tree.node(ch).state);
        }
    }
    pick(None).ok_or(Error::NoChildren { node: id })
}

/// Pop one pending action of `id` and attach the resulting child. `None`
/// when every action has already been expanded.
pub fn expand(tree: &mut Tree, id: NodeId, store: &StatisticsStore) -> Option<NodeId> {
    let action = tree.node_mut(id).unvisited_actions.pop()?;
    let state = tree.node(id).state.child(&action);
    Some(tree.add_child(id, state, action, store))
}

/// Selection: walk down from the root until a node can be expanded or a
/// terminal node is reached. Positions on the path are recorded in `visited`.
pub fn tree_policy(tree: &mut Tree, store: &StatisticsStore, visited: &mut HashSet<GameState>, c: f64) -> Result<NodeId> {
    let mut id = ROOT;
    visited.insert(tree.node(id).state.clone());
    while !tree.node(id).is_terminal() {
        if let Some(child) = expand(tree, id, store) {
            return Ok(child);
        }
        id = best_child(tree, id, c, Some(visited))?;
        visited.insert(tree.node(id).state.clone());
    }
    Ok(id)
}

/// Uniformly random playout to the end of the game. Returns 1.0 when the
/// player to move at the end is the player to move at `state`, else 0.0.
pub fn default_policy<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> f64 {
    let mut s = state.clone();
    let mut actions = s.legal_actions();
    while !actions.is_empty() {
        let i = rng.gen_range(0..actions.len());
        s.apply_action(&actions[i]);
        actions = s.legal_actions();
    }
    if s.to_move() == state.to_move() { 1.0 } else { 0.0 }
}

/// Propagate `reward` from `id` to the root, negating it at each step up.
pub fn backup(tree: &mut Tree, mut id: NodeId, mut reward: f64) {
    loop {
        let node = tree.node_mut(id);
        node.update(reward);
        reward = -reward;
        match node.parent {
            Some(parent) => id = parent,
            None => break,
        }
    }
}

/// Run UCT from `state` until the budget is spent. The budget is checked
/// after each full iteration, so at least one iteration always runs; with
/// neither a movetime nor an iteration cap exactly one runs.
pub fn search_with_params(state: &GameState, params: UctParams, ctx: &mut SearchContext) -> Result<UctResult> {
    let mut tree = Tree::new(state.clone(), &ctx.store);
    if tree.root().is_terminal() {
        return Err(Error::NoLegalActions);
    }
    let start = Instant::now();
    let mut iterations = 0u64;
    loop {
        let mut visited = HashSet::new();
        let leaf = tree_policy(&mut tree, &ctx.store, &mut visited, params.exploration)?;
        let reward = default_policy(&tree.node(leaf).state, ctx.rng());
        backup(&mut tree, leaf, reward);
        iterations += 1;

        let out_of_iterations = params.max_iterations.map_or(false, |n| iterations >= n);
        let out_of_time = params.movetime.map_or(false, |t| start.elapsed() >= t);
        let unbounded = params.max_iterations.is_none() && params.movetime.is_none();
        if out_of_iterations || out_of_time || unbounded { break; }
    }

    let tree_size = tree.len();
    let tree_depth = tree.depth();
    info!("mcts ran for {} iterations in {:.3}s", iterations, start.elapsed().as_secs_f64());
    info!("tree depth: {} size: {}", tree_depth, tree_size);
    ctx.store.merge_tree(&tree);
    debug!("store size: {}", ctx.store.len());

    let best = best_child(&tree, ROOT, params.exploration, None)?;
    Ok(UctResult {
        action: tree.node(best).action.clone(),
        iterations,
        root_visits: tree.root().visit_count,
        tree_size,
        tree_depth,
    })
}

/// Time-budgeted search returning only the chosen action.
pub fn uct_search(state: &GameState, movetime: Duration, ctx: &mut SearchContext) -> Result<Action> {
    let params = UctParams { movetime: Some(movetime), ..UctParams::default() };
    search_with_params(state, params, ctx).map(|r| r.action)
}
