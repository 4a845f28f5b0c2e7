use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use token_aligner::{
    generate::{generate_pair, GenerateOptions},
    prelude::*,
};

const E: f32 = 0.05;

fn bench_nw(c: &mut Criterion) {
    let mut group = c.benchmark_group("nw");
    let nw = NW::default();
    for n in [100, 1000, 3000] {
        let opt = GenerateOptions {
            length: n,
            error_rate: E,
            mode: Mode::Char,
        };
        let (sa, sb) = generate_pair(&opt, &mut ChaCha8Rng::seed_from_u64(0));
        let (a, b) = (tokenize(&sa, Mode::Char), tokenize(&sb, Mode::Char));
        group.bench_with_input(BenchmarkId::new("align", n), &n, |bench, _| {
            bench.iter(|| nw.align(black_box(&a), black_box(&b)).distance)
        });
        group.bench_with_input(BenchmarkId::new("cost", n), &n, |bench, _| {
            bench.iter(|| nw.cost(black_box(&a), black_box(&b)))
        });
    }
    group.finish();
}

fn bench_words(c: &mut Criterion) {
    let opt = GenerateOptions {
        length: 2000,
        error_rate: E,
        mode: Mode::Word,
    };
    let (sa, sb) = generate_pair(&opt, &mut ChaCha8Rng::seed_from_u64(0));
    c.bench_function("tokenize_and_align_words", |bench| {
        bench.iter(|| {
            let (a, b) = (tokenize(&sa, Mode::Word), tokenize(&sb, Mode::Word));
            align(&a, &b, &CostModel::unit(), false).distance
        })
    });
}

criterion_group!(benches, bench_nw, bench_words);
criterion_main!(benches);
