//! Low-level DSP primitives used by the multiband engine.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! making them safe to run inside an audio callback. They intentionally stay
//! focused on the signal-processing math so the engine layer can handle
//! buffer orchestration and parameter flow.

/// Second-order IIR section with per-channel state.
pub mod biquad;
/// Feedforward log-domain compressor with asymmetric smoothing.
pub mod compressor;
/// 4th-order Linkwitz-Riley crossover section.
pub mod crossover;
/// Decibel conversions, trim ramps and buffer arithmetic.
pub mod gain;

pub use biquad::FilterKind;
