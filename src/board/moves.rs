use crate::board::{Player, Pos};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Simple,
    Capture,
}

/// One atomic hop of a single piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
    pub kind: MoveKind,
    pub player: Player,
}

impl Move {
    pub fn simple(from: Pos, to: Pos, player: Player) -> Self {
        Self { from, to, kind: MoveKind::Simple, player }
    }

    pub fn capture(from: Pos, to: Pos, player: Player) -> Self {
        Self { from, to, kind: MoveKind::Capture, player }
    }

    pub fn is_capture(&self) -> bool { self.kind == MoveKind::Capture }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// One ply: an ordered, non-empty sequence of hops. The empty action is the
/// nil sentinel and is never returned by move generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub moves: Vec<Move>,
}

impl Action {
    pub fn new(moves: Vec<Move>) -> Self { Self { moves } }

    pub fn nil() -> Self { Self::default() }

    pub fn is_nil(&self) -> bool { self.moves.is_empty() }

    /// True for capture chains; captures and simple moves never mix within one action.
    pub fn is_capture(&self) -> bool {
        self.moves.first().map_or(false, Move::is_capture)
    }

    pub fn origin(&self) -> Option<Pos> { self.moves.first().map(|m| m.from) }

    pub fn destination(&self) -> Option<Pos> { self.moves.last().map(|m| m.to) }
}

impl From<Move> for Action {
    fn from(m: Move) -> Self { Self { moves: vec![m] } }
}

/// `(2, 1)-(3, 0)` for a simple move, `(5, 2)x(7, 4)x(5, 6)` for a chain.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.moves.first() else { return write!(f, "(nil)") };
        write!(f, "{}", first.from)?;
        for m in &self.moves {
            let sep = if m.is_capture() { 'x' } else { '-' };
            write!(f, "{}{}", sep, m.to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(r: usize, c: usize) -> Pos { Pos::new(r, c).unwrap() }

    #[test]
    fn action_notation() {
        let simple = Action::from(Move::simple(p(2, 1), p(3, 0), Player::One));
        assert_eq!(simple.to_string(), "(2, 1)-(3, 0)");
        let chain = Action::new(vec![
            Move::capture(p(5, 2), p(7, 4), Player::One),
            Move::capture(p(7, 4), p(5, 6), Player::One),
        ]);
        assert_eq!(chain.to_string(), "(5, 2)x(7, 4)x(5, 6)");
        assert!(chain.is_capture());
        assert_eq!(chain.destination(), Some(p(5, 6)));
        assert_eq!(Action::nil().to_string(), "(nil)");
        assert!(Action::nil().is_nil());
    }
}
