//! Legal move generation and action application.
//!
//! Captures are mandatory: when any piece of the side to move can jump, only
//! maximal capture chains are legal. A chain may not jump the same piece
//! twice; the set of pieces already jumped travels with each recursive
//! branch by value, so sibling branches never observe each other's captures.

use crate::board::{Action, Board, Move, Player, Pos, Square};

/// Diagonal directions as (forward multiplier, column delta), in generation
/// order: forward-west, backward-west, forward-east, backward-east.
const DIRECTIONS: [(i32, i32); 4] = [(1, -1), (-1, -1), (1, 1), (-1, 1)];

/// Squares already captured earlier in a chain. `Copy`, so each recursive
/// call owns an independent snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Captured(u64);

impl Captured {
    fn bit(pos: Pos) -> u64 { 1u64 << (pos.row() * 8 + pos.col()) }

    fn contains(self, pos: Pos) -> bool { self.0 & Self::bit(pos) != 0 }

    fn with(self, pos: Pos) -> Self { Captured(self.0 | Self::bit(pos)) }
}

fn directions(player: Player, is_king: bool) -> impl Iterator<Item = (i32, i32)> {
    let fwd = player.forward();
    DIRECTIONS
        .into_iter()
        .filter(move |&(f, _)| is_king || f > 0)
        .map(move |(f, dc)| (f * fwd, dc))
}

impl Board {
    /// Simple (non-capturing) single steps for one piece.
    pub fn legal_moves_for_piece(&self, from: Pos, is_king: bool, player: Player) -> Vec<Move> {
        directions(player, is_king)
            .filter_map(|(dr, dc)| from.offset(dr, dc))
            .filter(|&to| self[to].is_empty())
            .map(|to| Move::simple(from, to, player))
            .collect()
    }

    /// Every maximal capture chain available to the piece on `from`.
    pub fn legal_takes_for_piece(&self, from: Pos, is_king: bool, player: Player) -> Vec<Action> {
        self.take_chains(from, is_king, player, Captured::default())
            .into_iter()
            .map(|landings| {
                let mut prev = from;
                let moves = landings
                    .into_iter()
                    .map(|to| {
                        let m = Move::capture(prev, to, player);
                        prev = to;
                        m
                    })
                    .collect();
                Action::new(moves)
            })
            .collect()
    }

    // Landing squares of each chain continuing from `from`. Empty when no
    // jump is available, which is what marks the caller's chain as maximal.
    fn take_chains(&self, from: Pos, is_king: bool, player: Player, captured: Captured) -> Vec<Vec<Pos>> {
        let opponent = player.other();
        let mut chains = Vec::new();
        for (dr, dc) in directions(player, is_king) {
            let (Some(over), Some(land)) = (from.offset(dr, dc), from.offset(2 * dr, 2 * dc)) else {
                continue;
            };
            if !self[land].is_empty() || !self[over].belongs_to(opponent) || captured.contains(over) {
                continue;
            }
            let rest = self.take_chains(land, is_king, player, captured.with(over));
            if rest.is_empty() {
                chains.push(vec![land]);
            } else {
                chains.extend(rest.into_iter().map(|tail| {
                    let mut chain = Vec::with_capacity(tail.len() + 1);
                    chain.push(land);
                    chain.extend(tail);
                    chain
                }));
            }
        }
        chains
    }

    /// All legal actions for `player`: the capture chains of every piece if
    /// any exist, otherwise every simple step wrapped as a one-move action.
    pub fn legal_actions(&self, player: Player) -> Vec<Action> {
        let own: Vec<(Pos, Square)> = self.pieces().filter(|(_, sq)| sq.belongs_to(player)).collect();

        let takes: Vec<Action> = own
            .iter()
            .flat_map(|&(pos, sq)| self.legal_takes_for_piece(pos, sq.is_king(), player))
            .collect();
        if !takes.is_empty() {
            return takes;
        }

        // Later pieces' steps come first.
        own.iter()
            .rev()
            .flat_map(|&(pos, sq)| self.legal_moves_for_piece(pos, sq.is_king(), player))
            .map(Action::from)
            .collect()
    }

    /// Apply every hop of `action` in order: relocate the piece, remove the
    /// jumped piece for captures, and crown on the far rank.
    pub fn apply_action(&mut self, action: &Action) {
        for m in &action.moves {
            self[m.to] = self[m.from];
            self[m.from] = Square::Empty;
            if m.is_capture() {
                self[m.from.midpoint(m.to)] = Square::Empty;
            }
            if m.to.row() == m.player.promotion_row() {
                self[m.to] = Square::King(m.player);
            }
        }
    }
}
