use checkbot::selfplay::{generate_games, read_jsonl, write_jsonl, EngineKind, MatchParams};
use checkbot::Error;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn write_and_read_jsonl() {
    let params = MatchParams {
        games: 3,
        max_plies: 8,
        engines: [EngineKind::Random, EngineKind::Random],
        seed: 123,
        ..MatchParams::default()
    };
    let games = generate_games(&params, |_, _| {}).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.jsonl");
    write_jsonl(&games, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    let back = read_jsonl(&path).unwrap();
    assert_eq!(back, games);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = read_jsonl(dir.path().join("nope.jsonl")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn garbage_line_is_a_serialization_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.jsonl");
    std::fs::write(&path, "{not json}\n").unwrap();
    assert!(matches!(read_jsonl(&path), Err(Error::Serialization(_))));
}
