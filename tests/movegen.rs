use checkbot::{Action, Board, GameState, Player, Pos, Square};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn p(r: usize, c: usize) -> Pos { Pos::new(r, c).unwrap() }

#[test]
fn single_capture_onto_back_row_promotes() {
    let mut b = Board::empty();
    b.set(p(5, 2), Square::Man(Player::One));
    b.set(p(6, 3), Square::Man(Player::Two));
    let s = GameState::new(b, Player::One);

    let actions = s.legal_actions();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].to_string(), "(5, 2)x(7, 4)");

    let next = s.child(&actions[0]);
    assert_eq!(next.board.get(p(7, 4)), Square::King(Player::One));
    assert_eq!(next.board.get(p(6, 3)), Square::Empty);
    assert_eq!(next.board.get(p(5, 2)), Square::Empty);
    assert_eq!(next.to_move(), Player::Two);
    assert!(next.is_terminal());
}

#[test]
fn captures_exclude_simple_moves() {
    let mut b = Board::empty();
    b.set(p(2, 1), Square::Man(Player::One));
    b.set(p(2, 5), Square::Man(Player::One));
    b.set(p(3, 2), Square::Man(Player::Two));
    let actions = b.legal_actions(Player::One);
    assert_eq!(actions.len(), 1);
    assert!(actions.iter().all(|a| a.is_capture()));
}

#[test]
fn only_maximal_chains_are_legal() {
    let mut b = Board::empty();
    b.set(p(2, 1), Square::Man(Player::One));
    b.set(p(3, 2), Square::Man(Player::Two));
    b.set(p(5, 4), Square::Man(Player::Two));
    let actions = b.legal_actions(Player::One);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].to_string(), "(2, 1)x(4, 3)x(6, 5)");

    let mut after = b.clone();
    after.apply_action(&actions[0]);
    assert_eq!(after.count(Square::Man(Player::Two)), 0);
    assert_eq!(after.get(p(6, 5)), Square::Man(Player::One));
}

#[test]
fn start_position_is_balanced() {
    let s = GameState::startpos();
    assert_eq!(s.evaluate(Player::One), 0.0);
    assert_eq!(s.evaluate(Player::Two), 0.0);
    assert_eq!(s.board.count(Square::Man(Player::One)), 12);
    assert_eq!(s.board.count(Square::Man(Player::Two)), 12);
}

#[test]
fn parsed_board_matches_display() {
    let b = Board::startpos();
    let text = b.to_string();
    let parsed: Board = text.parse().unwrap();
    assert_eq!(parsed, b);
}

fn pieces_of(board: &Board, player: Player) -> usize {
    board.pieces().filter(|(_, sq)| sq.belongs_to(player)).count()
}

fn check_actions(state: &GameState, actions: &[Action]) {
    let captures = actions.iter().filter(|a| a.is_capture()).count();
    assert!(captures == 0 || captures == actions.len(), "captures mixed with steps in\n{state}");
    for a in actions.iter().filter(|a| a.is_capture()) {
        for b in actions.iter().filter(|b| b.moves.len() > a.moves.len()) {
            assert!(!b.moves.starts_with(&a.moves), "{a} is a prefix of {b}");
        }
    }
}

fn check_apply(state: &GameState, action: &Action) {
    let mover = state.to_move();
    let origin = action.origin().unwrap();
    let dest = action.destination().unwrap();
    let was_king = state.board.get(origin).is_king();
    let next = state.child(action);

    assert!(next.board.get(origin).is_empty(), "source not vacated by {action}");
    assert!(next.board.get(dest).belongs_to(mover));
    let crowned = action.moves.iter().any(|m| m.to.row() == mover.promotion_row());
    assert_eq!(next.board.get(dest).is_king(), was_king || crowned, "promotion mismatch for {action}");

    let hops = action.moves.iter().filter(|m| m.is_capture()).count();
    assert_eq!(pieces_of(&next.board, mover), pieces_of(&state.board, mover));
    assert_eq!(pieces_of(&next.board, mover.other()), pieces_of(&state.board, mover.other()) - hops);
    for m in action.moves.iter().filter(|m| m.is_capture()) {
        assert!(next.board.get(m.from.midpoint(m.to)).is_empty());
    }
}

#[test]
fn random_playouts_keep_move_rules() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for _ in 0..300 {
        let mut state = GameState::startpos();
        for _ in 0..300 {
            let actions = state.legal_actions();
            if actions.is_empty() { break; }
            check_actions(&state, &actions);
            let action = &actions[rng.gen_range(0..actions.len())];
            check_apply(&state, action);
            state.apply_action(action);
        }
    }
}
