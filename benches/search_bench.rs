use criterion::{criterion_group, criterion_main, Criterion, black_box};
use checkbot::search::alphabeta::{SearchParams, Searcher};
use checkbot::GameState;

fn bench_search(c: &mut Criterion) {
    let s = GameState::startpos();
    c.bench_function("search_depth_6_startpos", |ben| {
        ben.iter(|| {
            let mut searcher = Searcher::default();
            let p = SearchParams { depth: 6, movetime: None };
            let r = searcher.search_with_params(black_box(&s), p);
            black_box(r.nodes)
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
