use checkbot::perft::{divide, perft};
use checkbot::GameState;
use pretty_assertions::assert_eq;

#[test]
fn perft_startpos_small_depths() {
    let s = GameState::startpos();
    assert_eq!(perft(&s, 0), 1);
    assert_eq!(perft(&s, 1), 7);
    assert_eq!(perft(&s, 2), 49);
    assert_eq!(perft(&s, 3), 302);
    assert_eq!(perft(&s, 4), 1469);
}

#[test]
fn divide_sums_to_perft() {
    let s = GameState::startpos();
    let split = divide(&s, 3);
    assert_eq!(split.len(), 7);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), perft(&s, 3));
    assert!(split.iter().all(|(a, _)| !a.is_capture()));
}
