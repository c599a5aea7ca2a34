//! Microbenchmark that isolates the bitap scan from matcher construction
//! and collection overhead.

use criterion::{Criterion, criterion_group, criterion_main};

use sift::{BitapMatcher, MatchOptions, MatchOptionsBuilder, PatternMatcher};

/// Deterministic synthetic corpus; no fixture files needed.
fn synthetic_lines() -> Vec<String> {
    let words = [
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
    ];
    (0..4096)
        .map(|i| {
            format!(
                "{}/{}/{}_{}.rs",
                words[i % 8],
                words[(i / 8) % 8],
                words[(i / 64) % 8],
                i
            )
        })
        .collect()
}

fn bench_matcher(c: &mut Criterion) {
    let lines = synthetic_lines();

    c.bench_function("bitap_exact", |b| {
        let matcher = BitapMatcher::new("charlie", MatchOptions::default()).unwrap();
        b.iter(|| {
            lines
                .iter()
                .filter(|line| matcher.match_text(line).is_match)
                .count()
        });
    });

    c.bench_function("bitap_one_error", |b| {
        let matcher = BitapMatcher::new("charlei", MatchOptions::default()).unwrap();
        b.iter(|| {
            lines
                .iter()
                .filter(|line| matcher.match_text(line).is_match)
                .count()
        });
    });

    c.bench_function("bitap_ignore_location", |b| {
        let options = MatchOptionsBuilder::default()
            .ignore_location(true)
            .build()
            .unwrap();
        let matcher = BitapMatcher::new("foxtrot", options).unwrap();
        b.iter(|| {
            lines
                .iter()
                .filter(|line| matcher.match_text(line).is_match)
                .count()
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_matcher
);
criterion_main!(benches);
