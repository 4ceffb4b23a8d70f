//! Benchmark for the complete three-band processor.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use triband_dsp::{BandParams, EngineConfig, MultibandProcessor, ProcessorParams};

use crate::BLOCK_SIZES;

pub fn bench_processor(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/processor");

    let band = BandParams {
        threshold_db: -20.0,
        ratio: 4.0,
        attack_ms: 10.0,
        release_ms: 100.0,
        ..BandParams::default()
    };
    let params = ProcessorParams {
        low: band,
        mid: band,
        high: band,
        ..ProcessorParams::default()
    };

    for &size in BLOCK_SIZES {
        let input: Vec<Vec<f32>> = (0..2)
            .map(|_| {
                (0..size)
                    .map(|i| (std::f32::consts::TAU * 997.0 * i as f32 / 48_000.0).sin() * 0.8)
                    .collect()
            })
            .collect();

        let mut engine = MultibandProcessor::new(EngineConfig { channels: 2 });
        engine.prepare(48_000.0, size, &params).unwrap();

        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("stereo_3band", size), &size, |b, _| {
            b.iter(|| {
                for (dst, src) in buffer.iter_mut().zip(input.iter()) {
                    dst.copy_from_slice(src);
                }
                engine
                    .process(black_box(&mut buffer), black_box(&params))
                    .unwrap();
            })
        });
    }

    group.finish();
}
