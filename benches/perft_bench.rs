use criterion::{criterion_group, criterion_main, Criterion, black_box};
use checkbot::perft::perft;
use checkbot::GameState;

fn bench_perft(c: &mut Criterion) {
    let s = GameState::startpos();
    c.bench_function("perft_5_startpos", |b| b.iter(|| perft(black_box(&s), 5)));
    c.bench_function("legal_actions_startpos", |b| b.iter(|| black_box(&s).legal_actions()));
}

criterion_group!(benches, bench_perft);
criterion_main!(benches);
