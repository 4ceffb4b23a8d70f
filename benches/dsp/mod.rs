//! Benchmarks for low-level DSP primitives.

mod biquad;
mod compressor;
mod crossover;

pub use biquad::bench_biquad;
pub use compressor::bench_compressor;
pub use crossover::bench_crossover;
