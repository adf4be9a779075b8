use atkin::Sieve;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_new_1m(c: &mut Criterion) {
    c.bench_function("Sieve::new(1_000_000)", |b| {
        b.iter(|| Sieve::new(black_box(1_000_000)));
    });
}

fn bench_new_10m(c: &mut Criterion) {
    let mut group = c.benchmark_group("large");
    group.sample_size(10);
    group.bench_function("Sieve::new(10_000_000)", |b| {
        b.iter(|| Sieve::new(black_box(10_000_000)));
    });
    group.finish();
}

fn bench_is_prime(c: &mut Criterion) {
    let sieve = Sieve::new(1_000_000);
    c.bench_function("is_prime(999_983)", |b| {
        b.iter(|| sieve.is_prime(black_box(999_983)));
    });
}

fn bench_resize_shrink(c: &mut Criterion) {
    c.bench_function("resize shrink (buffer reuse)", |b| {
        let mut sieve = Sieve::new(1_000_000);
        b.iter(|| sieve.resize(black_box(500_000)));
    });
}

fn bench_count(c: &mut Criterion) {
    let sieve = Sieve::new(1_000_000);
    c.bench_function("count(1_000_000)", |b| {
        b.iter(|| black_box(&sieve).count());
    });
}

criterion_group!(
    benches,
    bench_new_1m,
    bench_new_10m,
    bench_is_prime,
    bench_resize_shrink,
    bench_count,
);
criterion_main!(benches);
