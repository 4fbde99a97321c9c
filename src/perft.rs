use crate::board::Action;
use crate::state::GameState;

// Leaf count of the legal-action tree `depth` plies deep.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let actions = state.legal_actions();
    if depth == 1 { return actions.len() as u64; }
    actions.iter().map(|a| perft(&state.child(a), depth - 1)).sum()
}

// Per-root-action breakdown of `perft`.
pub fn divide(state: &GameState, depth: u32) -> Vec<(Action, u64)> {
    if depth == 0 { return Vec::new(); }
    state
        .legal_actions()
        .into_iter()
        .map(|a| {
            let n = perft(&state.child(&a), depth - 1);
            (a, n)
        })
        .collect()
}
