pub mod dsp;
pub mod engine; // Band splitting, compression and recombination
pub mod io;
pub mod params; // Per-block control snapshots

#[cfg(feature = "rtrb")]
pub mod control; // Lock-free control-thread parameter flow

pub use engine::band::BandId;
pub use engine::{EngineConfig, MultibandProcessor};
pub use params::{BandParams, ProcessorParams};

pub const MAX_BLOCK_SIZE: usize = 2048;
