//! Benchmarks for the Linkwitz-Riley crossover section.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use triband_dsp::dsp::biquad::FilterKind;
use triband_dsp::dsp::crossover::LinkwitzRileySection;

use crate::BLOCK_SIZES;

pub fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/crossover");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // A matched LP/HP pair, the workload of one crossover point.
        let mut lp = LinkwitzRileySection::new(1);
        lp.set_crossover_frequency(1_000.0, 48_000.0).unwrap();
        lp.set_kind(FilterKind::Lowpass);
        let mut hp = LinkwitzRileySection::new(1);
        hp.set_crossover_frequency(1_000.0, 48_000.0).unwrap();
        hp.set_kind(FilterKind::Highpass);

        let mut low = input.clone();
        let mut high = input.clone();
        group.bench_with_input(BenchmarkId::new("lp_hp_pair", size), &size, |b, _| {
            b.iter(|| {
                for ((&x, l), h) in input.iter().zip(low.iter_mut()).zip(high.iter_mut()) {
                    *l = lp.process(black_box(x), 0);
                    *h = hp.process(black_box(x), 0);
                }
            })
        });
    }

    group.finish();
}
