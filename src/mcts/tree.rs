//! Arena-backed search tree.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. A node owns
//! its children through their ids; the parent id is a plain back-reference.
//! Dropping the [`Tree`] releases every node at once.

use crate::board::Action;
use crate::mcts::store::{NodeStats, StatisticsStore};
use crate::state::GameState;

pub type NodeId = usize;

pub const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub state: GameState,
    /// Action that produced this node from its parent; nil at the root.
    pub action: Action,
    pub visit_count: u32,
    pub total_reward: f64,
    /// `total_reward / visit_count`; meaningless while `visit_count` is 0.
    pub avg_reward: f64,
    /// Legal actions not yet expanded into children.
    pub unvisited_actions: Vec<Action>,
}

impl Node {
    fn new(parent: Option<NodeId>, state: GameState, action: Action) -> Self {
        let unvisited_actions = state.legal_actions();
        Self {
            parent,
            children: Vec::new(),
            state,
            action,
            visit_count: 0,
            total_reward: 0.0,
            avg_reward: 0.0,
            unvisited_actions,
        }
    }

    // Start from stored statistics instead of zero.
    fn seed(&mut self, stats: NodeStats) {
        self.total_reward = stats.total_reward;
        self.visit_count = stats.visit_count;
        if let Some(avg) = stats.avg_reward() {
            self.avg_reward = avg;
        }
    }

    /// Nothing left to expand and nothing to descend into.
    pub fn is_terminal(&self) -> bool {
        self.unvisited_actions.is_empty() && self.children.is_empty()
    }

    pub fn stats(&self) -> NodeStats {
        NodeStats { total_reward: self.total_reward, visit_count: self.visit_count }
    }

    pub fn update(&mut self, reward: f64) {
        self.visit_count += 1;
        self.total_reward += reward;
        self.avg_reward = self.total_reward / self.visit_count as f64;
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// A lone root for `state`, warm-started from `store` when it has an entry.
    pub fn new(state: GameState, store: &StatisticsStore) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.load(None, state, Action::nil(), store);
        tree
    }

    fn load(&mut self, parent: Option<NodeId>, state: GameState, action: Action, store: &StatisticsStore) -> NodeId {
        let stats = store.get(&state);
        let mut node = Node::new(parent, state, action);
        if let Some(stats) = stats {
            node.seed(stats);
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Create a child of `parent` and attach it.
    pub fn add_child(&mut self, parent: NodeId, state: GameState, action: Action, store: &StatisticsStore) -> NodeId {
        let id = self.load(Some(parent), state, action, store);
        self.nodes[parent].children.push(id);
        id
    }

    pub fn root(&self) -> &Node { &self.nodes[ROOT] }

    pub fn node(&self, id: NodeId) -> &Node { &self.nodes[id] }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node { &mut self.nodes[id] }

    /// Number of nodes.
    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Levels in the tree; a lone root has depth 1.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(ROOT, 1usize)];
        while let Some((id, d)) = stack.pop() {
            max_depth = max_depth.max(d);
            stack.extend(self.nodes[id].children.iter().map(|&c| (c, d + 1)));
        }
        max_depth
    }

    /// Depth-first walk from the root, parents before children.
    pub fn preorder(&self) -> impl Iterator<Item = &Node> + '_ {
        let mut stack = vec![ROOT];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id];
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_cold_without_store_entry() {
        let tree = Tree::new(GameState::startpos(), &StatisticsStore::new());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.root().visit_count, 0);
        assert_eq!(tree.root().unvisited_actions.len(), 7);
        assert!(tree.root().parent.is_none());
    }

    #[test]
    fn children_link_back_to_parent() {
        let store = StatisticsStore::new();
        let mut tree = Tree::new(GameState::startpos(), &store);
        let action = tree.node_mut(ROOT).unvisited_actions.pop().unwrap();
        let state = tree.root().state.child(&action);
        let child = tree.add_child(ROOT, state, action, &store);
        let grand_action = tree.node(child).unvisited_actions[0].clone();
        let grand_state = tree.node(child).state.child(&grand_action);
        let grand = tree.add_child(child, grand_state, grand_action, &store);
        assert_eq!(tree.node(child).parent, Some(ROOT));
        assert_eq!(tree.node(grand).parent, Some(child));
        assert_eq!(tree.root().children, vec![child]);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.preorder().count(), 3);
    }

    #[test]
    fn stored_stats_seed_new_nodes() {
        let mut store = StatisticsStore::new();
        store.insert(GameState::startpos(), NodeStats { total_reward: 6.0, visit_count: 8 });
        let tree = Tree::new(GameState::startpos(), &store);
        assert_eq!(tree.root().visit_count, 8);
        assert_eq!(tree.root().total_reward, 6.0);
        assert_eq!(tree.root().avg_reward, 0.75);
    }

    #[test]
    fn update_keeps_average_in_sync() {
        let mut tree = Tree::new(GameState::startpos(), &StatisticsStore::new());
        let root = tree.node_mut(ROOT);
        root.update(1.0);
        root.update(0.0);
        root.update(-1.0);
        assert_eq!(root.visit_count, 3);
        assert_eq!(root.avg_reward, 0.0);
    }
}
