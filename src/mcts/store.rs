use crate::mcts::tree::Tree;
use crate::state::GameState;
use std::collections::HashMap;

/// Aggregated statistics of every node ever built for one position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeStats {
    pub total_reward: f64,
    pub visit_count: u32,
}

impl NodeStats {
    pub fn avg_reward(&self) -> Option<f64> {
        (self.visit_count > 0).then(|| self.total_reward / self.visit_count as f64)
    }
}

/// Position -> statistics cache shared across successive searches.
///
/// Grows monotonically. Merging a tree overwrites existing entries; when two
/// nodes of one tree hold the same position, the one merged last wins.
#[derive(Default, Debug, Clone)]
pub struct StatisticsStore {
    entries: HashMap<GameState, NodeStats>,
}

impl StatisticsStore {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, state: &GameState) -> Option<NodeStats> { self.entries.get(state).copied() }

    pub fn insert(&mut self, state: GameState, stats: NodeStats) -> Option<NodeStats> {
        self.entries.insert(state, stats)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Write every node of `tree` into the store, parents before children.
    pub fn merge_tree(&mut self, tree: &Tree) {
        for node in tree.preorder() {
            self.entries.insert(node.state.clone(), node.stats());
        }
    }
}
