use crate::board::{Action, Board, Player};
use std::fmt;

/// A board paired with the player to move.
///
/// Equality, hashing and ordering are structural (board contents, then the
/// mover), so two states compare equal exactly when they are the same
/// position with the same side to move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameState {
    pub board: Board,
    to_move: Player,
}

impl Default for GameState {
    fn default() -> Self { Self::startpos() }
}

impl GameState {
    pub fn new(board: Board, to_move: Player) -> Self { Self { board, to_move } }

    /// Standard opening with player one to move.
    pub fn startpos() -> Self { Self::new(Board::startpos(), Player::One) }

    pub fn to_move(&self) -> Player { self.to_move }

    /// Hand the turn to the other player.
    pub fn next(&mut self) -> Player {
        self.to_move = self.to_move.other();
        self.to_move
    }

    pub fn legal_actions(&self) -> Vec<Action> { self.board.legal_actions(self.to_move) }

    /// The side to move has nothing to play; it has lost.
    pub fn is_terminal(&self) -> bool { self.legal_actions().is_empty() }

    pub fn evaluate(&self, player: Player) -> f64 { self.board.evaluate(player) }

    pub fn apply_action(&mut self, action: &Action) {
        self.board.apply_action(action);
        self.next();
    }

    /// Successor state, leaving `self` untouched.
    pub fn child(&self, action: &Action) -> GameState {
        let mut s = self.clone();
        s.apply_action(action);
        s
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}'s turn.", self.board, self.to_move)
    }
}
