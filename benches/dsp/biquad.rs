//! Benchmarks for the second-order IIR section.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use triband_dsp::dsp::biquad::{Biquad, FilterKind};

use crate::BLOCK_SIZES;

pub fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/biquad");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for kind in [FilterKind::Lowpass, FilterKind::Highpass, FilterKind::Allpass] {
            let name = match kind {
                FilterKind::Lowpass => "lowpass",
                FilterKind::Highpass => "highpass",
                FilterKind::Allpass => "allpass",
            };
            let mut filter = Biquad::new(1);
            filter
                .set_parameters(1_000.0, 0.707, kind, 48_000.0)
                .unwrap();
            let mut buffer = input.clone();

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    for sample in buffer.iter_mut() {
                        *sample = filter.process(black_box(*sample), 0);
                    }
                })
            });
        }
    }

    group.finish();
}
