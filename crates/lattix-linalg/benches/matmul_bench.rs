//! Benchmarks for the matrix multiplication strategies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use lattix_linalg::DenseMatrix;

/// Generates a random matrix with bounded integer-valued entries.
fn random_matrix(seed: u64, rows: usize, cols: usize) -> DenseMatrix<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    DenseMatrix::from_fn(rows, cols, |_, _| f64::from(rng.gen_range(-10..10)))
}

fn bench_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    group.sample_size(10);

    // 64 stays on the direct kernel; the larger sizes recurse.
    for size in [64, 128, 256, 512] {
        let a = random_matrix(1, size, size);
        let b = random_matrix(2, size, size);

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |bench, _| {
            bench.iter(|| black_box(&a).mm(black_box(&b)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |bench, _| {
            bench.iter(|| black_box(&a).mm_parallel(black_box(&b)).unwrap());
        });
    }

    group.finish();
}

fn bench_lup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lup");

    for size in [32, 128] {
        let mut m = random_matrix(3, size, size);
        for i in 0..size {
            m[(i, i)] += size as f64;
        }

        group.bench_with_input(BenchmarkId::new("decompose", size), &size, |bench, _| {
            bench.iter(|| black_box(&m).lup().unwrap());
        });

        group.bench_with_input(BenchmarkId::new("inverse", size), &size, |bench, _| {
            bench.iter(|| black_box(&m).inverse().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_multiplication, bench_lup);
criterion_main!(benches);
