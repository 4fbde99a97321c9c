//! Board representation: players, squares, coordinates and the 8x8 grid.
//!
//! Player one starts on rows 0..3 and moves towards row 7; player two starts
//! on rows 5..8 and moves towards row 0. Pieces live on the dark squares,
//! i.e. squares whose `row + col` is odd.

pub mod movegen;
pub mod moves;

pub use moves::{Action, Move, MoveKind};

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

pub const BOARD_SIZE: usize = 8;

/// Maximum number of pieces a side can ever have.
pub const MAX_PIECES: usize = 12;

pub const MAN_VALUE: f64 = 1.0;
pub const KING_VALUE: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Row delta of a forward step.
    pub fn forward(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// The row on which this player's men are promoted.
    pub fn promotion_row(self) -> usize {
        match self {
            Player::One => BOARD_SIZE - 1,
            Player::Two => 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Square {
    #[default]
    Empty,
    Man(Player),
    King(Player),
}

impl Square {
    pub fn is_empty(self) -> bool {
        self == Square::Empty
    }

    pub fn is_king(self) -> bool {
        matches!(self, Square::King(_))
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Man(p) | Square::King(p) => Some(p),
        }
    }

    pub fn belongs_to(self, player: Player) -> bool {
        self.owner() == Some(player)
    }

    pub fn glyph(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Man(Player::One) => 'x',
            Square::King(Player::One) => 'X',
            Square::Man(Player::Two) => 'o',
            Square::King(Player::Two) => 'O',
        }
    }

    /// Inverse of [`Square::glyph`]; `.` is accepted as an empty square too.
    pub fn from_glyph(c: char) -> Option<Square> {
        match c {
            ' ' | '.' => Some(Square::Empty),
            'x' => Some(Square::Man(Player::One)),
            'X' => Some(Square::King(Player::One)),
            'o' => Some(Square::Man(Player::Two)),
            'O' => Some(Square::King(Player::Two)),
            _ => None,
        }
    }
}

/// A square coordinate. Always in bounds once constructed through
/// [`Pos::new`] or [`Pos::offset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Option<Pos> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Pos { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    pub fn row(self) -> usize { self.row as usize }
    pub fn col(self) -> usize { self.col as usize }

    pub fn offset(self, dr: i32, dc: i32) -> Option<Pos> {
        let r = self.row as i32 + dr;
        let c = self.col as i32 + dc;
        if r < 0 || c < 0 { return None; }
        Pos::new(r as usize, c as usize)
    }

    /// Square jumped over when hopping from `self` to `to`.
    pub fn midpoint(self, to: Pos) -> Pos {
        Pos { row: (self.row + to.row) / 2, col: (self.col + to.col) / 2 }
    }

    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 8x8 grid, mutated in place by [`Board::apply_action`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self { Self::startpos() }
}

impl Board {
    pub fn empty() -> Self {
        Self { squares: [[Square::Empty; BOARD_SIZE]; BOARD_SIZE] }
    }

    /// Standard opening: 12 men per side on the dark squares of the three
    /// rows nearest each player.
    pub fn startpos() -> Self {
        let mut b = Self::empty();
        for row in 0..BOARD_SIZE {
            let player = match row {
                0..=2 => Player::One,
                5..=7 => Player::Two,
                _ => continue,
            };
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 == 1 {
                    b.squares[row][col] = Square::Man(player);
                }
            }
        }
        b
    }

    /// Build a board from raw squares, rejecting layouts that no legal game
    /// could produce.
    pub fn from_squares(squares: [[Square; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, BoardError> {
        let b = Self { squares };
        b.validate()?;
        Ok(b)
    }

    fn validate(&self) -> Result<(), BoardError> {
        let mut counts = [0usize; 2];
        for (pos, sq) in self.pieces() {
            let Some(player) = sq.owner() else { continue };
            if !pos.is_dark() {
                return Err(BoardError::PieceOnLightSquare { row: pos.row(), col: pos.col() });
            }
            if sq == Square::Man(player) && pos.row() == player.promotion_row() {
                return Err(BoardError::UnpromotedMan { player, row: pos.row(), col: pos.col() });
            }
            counts[player as usize] += 1;
        }
        for player in [Player::One, Player::Two] {
            let count = counts[player as usize];
            if count > MAX_PIECES {
                return Err(BoardError::TooManyPieces { player, count });
            }
        }
        Ok(())
    }

    pub fn get(&self, pos: Pos) -> Square {
        self.squares[pos.row()][pos.col()]
    }

    pub fn set(&mut self, pos: Pos, sq: Square) {
        self.squares[pos.row()][pos.col()] = sq;
    }

    /// All non-empty squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, Square)> + '_ {
        self.squares.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter(|(_, sq)| !sq.is_empty()).map(move |(c, &sq)| {
                (Pos { row: r as u8, col: c as u8 }, sq)
            })
        })
    }

    pub fn count(&self, sq: Square) -> usize {
        self.pieces().filter(|&(_, s)| s == sq).count()
    }

    /// Material balance; positive means player one has more.
    pub fn material(&self) -> f64 {
        self.pieces()
            .map(|(_, sq)| match sq {
                Square::Man(Player::One) => MAN_VALUE,
                Square::King(Player::One) => KING_VALUE,
                Square::Man(Player::Two) => -MAN_VALUE,
                Square::King(Player::Two) => -KING_VALUE,
                Square::Empty => 0.0,
            })
            .sum()
    }

    /// Material score from `player`'s point of view.
    pub fn evaluate(&self, player: Player) -> f64 {
        match player {
            Player::One => self.material(),
            Player::Two => -self.material(),
        }
    }
}

impl Index<Pos> for Board {
    type Output = Square;
    fn index(&self, pos: Pos) -> &Square { &self.squares[pos.row()][pos.col()] }
}

impl IndexMut<Pos> for Board {
    fn index_mut(&mut self, pos: Pos) -> &mut Square { &mut self.squares[pos.row()][pos.col()] }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            let line: Vec<String> = row.iter().map(|sq| sq.glyph().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Parses eight lines, each either eight glyphs (`.` or space for empty) or
/// the fifteen-character space-separated form produced by `Display`. In the
/// separated form every odd column must be a space.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().filter(|l| !l.trim().is_empty() || l.len() >= BOARD_SIZE).collect();
        if lines.len() != BOARD_SIZE {
            return Err(BoardError::BadShape { rows: lines.len(), bad_row: None });
        }
        let mut squares = [[Square::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            let glyphs: Vec<char> = match chars.len() {
                8 => chars,
                15 | 16 => {
                    if let Some((i, &sep)) = chars.iter().enumerate().skip(1).step_by(2).find(|&(_, &c)| c != ' ') {
                        return Err(BoardError::BadGlyph { glyph: sep, row, col: i / 2 });
                    }
                    chars.iter().step_by(2).copied().take(BOARD_SIZE).collect()
                }
                _ => return Err(BoardError::BadShape { rows: lines.len(), bad_row: Some(row) }),
            };
            for (col, &g) in glyphs.iter().enumerate() {
                squares[row][col] = Square::from_glyph(g).ok_or(BoardError::BadGlyph { glyph: g, row, col })?;
            }
        }
        Board::from_squares(squares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twelve_men_each() {
        let b = Board::startpos();
        assert_eq!(b.count(Square::Man(Player::One)), 12);
        assert_eq!(b.count(Square::Man(Player::Two)), 12);
        assert_eq!(b.pieces().count(), 24);
        assert!(b.pieces().all(|(p, _)| p.is_dark()));
        assert_eq!(b.get(Pos::new(0, 1).unwrap()), Square::Man(Player::One));
        assert_eq!(b.get(Pos::new(5, 0).unwrap()), Square::Man(Player::Two));
        assert!(b.get(Pos::new(3, 0).unwrap()).is_empty());
    }

    #[test]
    fn display_roundtrips_through_parser() {
        let b = Board::startpos();
        let text = b.to_string();
        assert_eq!(text.lines().next().unwrap(), "  x   x   x   x");
        let parsed: Board = text.parse().expect("rendered board parses");
        assert_eq!(parsed, b);
    }

    #[test]
    fn parser_rejects_bad_layouts() {
        let light = "x.......\n........\n........\n........\n........\n........\n........\n........";
        assert_eq!(light.parse::<Board>(), Err(BoardError::PieceOnLightSquare { row: 0, col: 0 }));
        let glyph = ".q......\n........\n........\n........\n........\n........\n........\n........";
        assert!(matches!(glyph.parse::<Board>(), Err(BoardError::BadGlyph { glyph: 'q', .. })));
        let unpromoted = "........\n........\n........\n........\n........\n........\n........\nx.......";
        assert_eq!(
            unpromoted.parse::<Board>(),
            Err(BoardError::UnpromotedMan { player: Player::One, row: 7, col: 0 })
        );
        assert!(matches!("........".parse::<Board>(), Err(BoardError::BadShape { .. })));
    }

    #[test]
    fn separated_rows_need_space_separators() {
        let blank = "               ";
        let board = |first: &str, second: &str| {
            let mut rows = vec![first, second];
            rows.extend([blank; 6]);
            rows.join("\n").parse::<Board>()
        };
        assert_eq!(board("xoxoxoxoxoxoxox", blank), Err(BoardError::BadGlyph { glyph: 'o', row: 0, col: 0 }));
        assert_eq!(board("  x . x   x   x", blank), Err(BoardError::BadGlyph { glyph: '.', row: 0, col: 1 }));

        let b = board("  x   x   x   x", "x   x   x   x  ").unwrap();
        assert_eq!(b.count(Square::Man(Player::One)), 8);
    }

    #[test]
    fn material_is_signed_by_player() {
        let mut b = Board::empty();
        b.set(Pos::new(0, 1).unwrap(), Square::King(Player::One));
        b.set(Pos::new(2, 1).unwrap(), Square::Man(Player::One));
        b.set(Pos::new(6, 1).unwrap(), Square::Man(Player::Two));
        assert_eq!(b.material(), KING_VALUE);
        assert_eq!(b.evaluate(Player::One), 1.5);
        assert_eq!(b.evaluate(Player::Two), -1.5);
        assert_eq!(Board::startpos().material(), 0.0);
    }

    #[test]
    fn square_predicates() {
        let k = Square::King(Player::Two);
        assert!(k.is_king());
        assert!(k.belongs_to(Player::Two));
        assert!(!k.belongs_to(Player::One));
        assert_eq!(Square::Empty.owner(), None);
        assert_eq!(Square::from_glyph('O'), Some(k));
    }

    #[test]
    fn pos_offsets_stay_in_bounds() {
        let p = Pos::new(0, 7).unwrap();
        assert_eq!(p.offset(-1, 0), None);
        assert_eq!(p.offset(1, 1), None);
        assert_eq!(p.offset(2, -2), Pos::new(2, 5));
        assert_eq!(Pos::new(5, 2).unwrap().midpoint(Pos::new(7, 4).unwrap()), Pos::new(6, 3).unwrap());
    }
}
