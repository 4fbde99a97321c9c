use crate::board::{Board, Player};

pub use crate::board::{KING_VALUE, MAN_VALUE};

// Forced win/loss score. Stops iterative deepening once reached.
pub const TERMINAL_SCORE: f64 = 15.0;

// Material from `player`'s perspective.
pub fn material_eval(board: &Board, player: Player) -> f64 {
    board.evaluate(player)
}

pub fn is_terminal_score(score: f64) -> bool {
    score.abs() == TERMINAL_SCORE
}
