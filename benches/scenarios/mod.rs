//! Full-processor scenario benchmarks.
//!
//! These model the real per-block workload: a stereo buffer through the
//! complete split → compress → recombine chain.

mod processor;

pub use processor::bench_processor;
