//! Benchmarks for the feedforward compressor.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use triband_dsp::dsp::compressor::Compressor;

use crate::BLOCK_SIZES;

pub fn bench_compressor(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/compressor");

    for &size in BLOCK_SIZES {
        // A tone hot enough to keep the gain computer fully engaged.
        let input: Vec<f32> = (0..size)
            .map(|i| (std::f32::consts::TAU * 997.0 * i as f32 / 48_000.0).sin() * 0.8)
            .collect();

        let mut comp = Compressor::new();
        comp.set_threshold(-20.0);
        comp.set_ratio(4.0);
        comp.set_attack_ms(10.0);
        comp.set_release_ms(100.0);
        comp.prepare(48_000.0, 1);

        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("engaged", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                comp.process_buffer(black_box(&mut buffer), 0);
            })
        });
    }

    group.finish();
}
