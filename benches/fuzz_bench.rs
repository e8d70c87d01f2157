//! Scorer throughput on short strings, plus extraction over a synthetic
//! candidate list large enough to take the parallel path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fuzzyratio::{
    dedupe_default, extract, levenshtein, partial_ratio, ratio, token_set_ratio, wratio,
    ExtractConfig, TokenConfig,
};

const PAIRS: [(&str, &str); 4] = [
    ("new york mets", "the wonderful new york mets"),
    ("new york mets vs atlanta braves", "atlanta braves vs new york mets"),
    ("needle", "haystackneedelhaystack"),
    ("JOHNSMITH6211986", "JOHNSMITH6201986"),
];

fn choices(n: usize) -> Vec<String> {
    let teams = ["mets", "braves", "cubs", "phillies", "white sox", "yankees"];
    (0..n)
        .map(|i| format!("{} vs {} {}", teams[i % teams.len()], teams[(i * 7 + 3) % teams.len()], i))
        .collect()
}

fn bench_scorers(c: &mut Criterion) {
    c.bench_function("levenshtein", |b| {
        b.iter(|| PAIRS.iter().map(|(x, y)| levenshtein(black_box(x), black_box(y))).sum::<usize>())
    });

    c.bench_function("ratio", |b| {
        b.iter(|| PAIRS.iter().map(|(x, y)| u32::from(ratio(black_box(x), black_box(y)))).sum::<u32>())
    });

    c.bench_function("partial_ratio", |b| {
        b.iter(|| {
            PAIRS
                .iter()
                .map(|(x, y)| u32::from(partial_ratio(black_box(x), black_box(y))))
                .sum::<u32>()
        })
    });

    c.bench_function("token_set_ratio", |b| {
        let config = TokenConfig::new(true, true);
        b.iter(|| {
            PAIRS
                .iter()
                .map(|(x, y)| u32::from(token_set_ratio(black_box(x), black_box(y), config)))
                .sum::<u32>()
        })
    });

    c.bench_function("wratio", |b| {
        b.iter(|| PAIRS.iter().map(|(x, y)| u32::from(wratio(black_box(x), black_box(y)))).sum::<u32>())
    });
}

fn bench_process(c: &mut Criterion) {
    let small = choices(50);
    let large = choices(2_000);
    let config = ExtractConfig::default();

    c.bench_function("extract_top5_sequential", |b| {
        b.iter(|| extract(black_box("mets vs braves"), &small, Some(5), &config))
    });

    c.bench_function("extract_top5_parallel", |b| {
        b.iter(|| extract(black_box("mets vs braves"), &large, Some(5), &config))
    });

    c.bench_function("dedupe_default", |b| b.iter(|| dedupe_default(black_box(&small))));
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_scorers, bench_process
);
criterion_main!(benches);
