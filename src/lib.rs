// Checkers engine: rule engine, alpha-beta minimax and UCT search
pub mod board;
pub mod error;
pub mod mcts;
pub mod perft;
pub mod search;
pub mod selfplay;
pub mod state;

pub use board::{Action, Board, Move, MoveKind, Player, Pos, Square};
pub use error::{BoardError, Error, Result};
pub use state::GameState;
