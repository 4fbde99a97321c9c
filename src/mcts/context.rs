use crate::mcts::store::StatisticsStore;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Everything an MCTS call reads and writes besides its own tree: the
/// statistics cache and the rollout random source. Owned by the caller and
/// passed to each search, which makes searches strictly sequential per
/// context.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub store: StatisticsStore,
    rng: SmallRng,
}

impl Default for SearchContext {
    fn default() -> Self { Self::from_entropy() }
}

impl SearchContext {
    /// Deterministic rollouts for a given seed.
    pub fn new(seed: u64) -> Self {
        Self { store: StatisticsStore::new(), rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { store: StatisticsStore::new(), rng: SmallRng::from_entropy() }
    }

    pub fn rng(&mut self) -> &mut SmallRng { &mut self.rng }
}
