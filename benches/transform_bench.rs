use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::hint::black_box;
use lanewise::*;

const SIZES: [usize; 3] = [1_024, 16_384, 262_144];

fn random(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// 1. UNARY: output on the same offset as the input vs shifted by one element
fn bench_unary(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform/unary");

    for &size in &SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let input = random(size + 1, 1);
        let mut output = vec![0.0_f32; size + 1];
        let op = AddValue::new(1.0_f32);

        group.bench_with_input(BenchmarkId::new("same_offset", size), &input, |b, input| {
            b.iter(|| black_box(transform(black_box(&input[..size]), &mut output[..size], op).len()))
        });

        group.bench_with_input(BenchmarkId::new("shifted_output", size), &input, |b, input| {
            b.iter(|| black_box(transform(black_box(&input[..size]), &mut output[1..], op).len()))
        });

        group.bench_with_input(BenchmarkId::new("scalar_loop", size), &input, |b, input| {
            b.iter(|| {
                for (o, &x) in output.iter_mut().zip(black_box(&input[..size])) {
                    *o = x + 1.0;
                }
                black_box(&output);
            })
        });
    }
    group.finish();
}

/// Index of the first element of `v` that sits on the vector boundary
fn aligned_start(v: &[f32]) -> usize {
    partition(v, lanes::<f32>(), Alignment::default()).prologue
}

/// 2. BINARY: all streams aligned together vs second input shifted
fn bench_binary(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform/binary");

    for &size in &SIZES {
        group.throughput(Throughput::Elements(size as u64));
        // Slack of one vector lets every stream start on the boundary
        let slack = lanes::<f32>();
        let a_buf = random(size + slack, 2);
        let b_buf = random(size + slack + 1, 3);
        let mut out_buf = vec![0.0_f32; size + slack];

        let a = &a_buf[aligned_start(&a_buf)..][..size];
        let b_start = aligned_start(&b_buf);
        let out_start = aligned_start(&out_buf);
        let output = &mut out_buf[out_start..][..size];

        group.bench_function(BenchmarkId::new("aligned", size), |bench| {
            bench.iter(|| black_box(transform2(black_box(a), &b_buf[b_start..], &mut *output, Mul).len()))
        });

        group.bench_function(BenchmarkId::new("shifted_input", size), |bench| {
            bench.iter(|| black_box(transform2(black_box(a), &b_buf[b_start + 1..], &mut *output, Mul).len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_unary, bench_binary);
criterion_main!(benches);
