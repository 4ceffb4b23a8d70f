//! triband - standalone three-band compressor demo
//!
//! Run with: cargo run --bin triband
//!
//! Plays a three-layer test signal (low rumble, pulsing mid tone, high
//! shimmer) through the multiband processor on the default audio output,
//! with each band compressed at its own settings.

mod app;

use app::Triband;
use triband_dsp::{BandParams, ProcessorParams};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let params = ProcessorParams {
        low: BandParams {
            threshold_db: -24.0,
            ratio: 4.0,
            attack_ms: 30.0,
            release_ms: 200.0,
            makeup_db: 2.0,
            ..BandParams::default()
        },
        mid: BandParams {
            threshold_db: -18.0,
            ratio: 3.0,
            attack_ms: 10.0,
            release_ms: 120.0,
            ..BandParams::default()
        },
        high: BandParams {
            threshold_db: -30.0,
            ratio: 6.0,
            attack_ms: 5.0,
            release_ms: 80.0,
            makeup_db: 3.0,
            ..BandParams::default()
        },
        crossover_low_mid_hz: 250.0,
        crossover_mid_high_hz: 2_500.0,
        input_gain_db: 0.0,
        output_gain_db: -3.0,
    };

    Triband::new(params).run()
}
