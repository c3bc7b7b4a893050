//! Benchmarks for scoring whole games.
//!
//! Run with: cargo bench --bench scoring

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pinfall::{BonusLedger, Frame, Game, PlayerHandle};
use std::hint::black_box;

/// A repeating mix of open frames, strikes and spares.
fn mixed_frames(len: usize) -> Vec<Frame> {
    let pattern: [&[u32]; 6] = [&[2, 3], &[10], &[4, 6], &[1, 2], &[10], &[3, 3]];
    pattern
        .iter()
        .cycle()
        .take(len)
        .map(|rolls| Frame::from(*rolls))
        .collect()
}

fn bench_total_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("Game::total_score");

    for len in [10usize, 100, 1000].iter() {
        let frames = mixed_frames(*len);
        group.bench_with_input(BenchmarkId::new("mixed", len), &frames, |b, frames| {
            b.iter(|| {
                Game::new(black_box(frames.clone()), 2)
                    .and_then(Game::total_score)
                    .ok()
            });
        });
    }

    group.finish();
}

fn bench_ledger_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("BonusLedger");

    group.bench_function("strike_chain", |b| {
        let strike = Frame::from([10]);
        b.iter(|| {
            let mut ledger = BonusLedger::new();
            let mut credited = 0u32;
            for position in 0..12 {
                credited += ledger.feed(black_box(strike.rolls()));
                if ledger
                    .classify_and_enqueue(&strike, position, PlayerHandle::new(0))
                    .is_err()
                {
                    break;
                }
            }
            credited + ledger.drain_partial()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_total_score, bench_ledger_feed);
criterion_main!(benches);
