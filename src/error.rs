//! Error types for the checkbot crate

use thiserror::Error;

use crate::board::Player;

/// Main error type for the checkbot crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("best child requested on node {node}, which has no children")]
    NoChildren { node: usize },

    #[error("no legal actions for the side to move")]
    NoLegalActions,

    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons a textual or hand-built board is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 8 rows of 8 squares, got {rows} rows (first bad row: {bad_row:?})")]
    BadShape { rows: usize, bad_row: Option<usize> },

    #[error("unknown square glyph '{glyph}' at ({row}, {col})")]
    BadGlyph { glyph: char, row: usize, col: usize },

    #[error("piece on light square ({row}, {col})")]
    PieceOnLightSquare { row: usize, col: usize },

    #[error("{player} has {count} pieces (at most 12)")]
    TooManyPieces { player: Player, count: usize },

    #[error("{player} man left unpromoted on its promotion rank at ({row}, {col})")]
    UnpromotedMan { player: Player, row: usize, col: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
