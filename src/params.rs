//! Per-block control values the host or UI layer hands to the engine.
//!
//! These are plain numbers: the engine reads one snapshot per block and
//! never holds references into it. Writers on another thread may update
//! fields between blocks; the engine tolerates a torn read across two
//! fields in the same block (no correctness invariant spans parameters).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::band::BandId;

/// Dynamics settings and routing flags for one frequency band.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandParams {
    /// Compression threshold in dB (roughly -60..12).
    pub threshold_db: f32,
    /// Compression ratio (> 1 compresses; 1 is transparent).
    pub ratio: f32,
    /// Attack time constant in ms (roughly 5..500).
    pub attack_ms: f32,
    /// Release time constant in ms (roughly 5..500).
    pub release_ms: f32,
    /// Post-compression makeup gain in dB.
    pub makeup_db: f32,
    /// Skip the compressor, passing the band through untouched.
    pub bypass: bool,
    /// Exclude this band from the recombined output.
    pub mute: bool,
    /// Isolate this band in the recombined output. Solo wins over mute.
    pub solo: bool,
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            threshold_db: 0.0,
            ratio: 3.0,
            attack_ms: 50.0,
            release_ms: 250.0,
            makeup_db: 0.0,
            bypass: false,
            mute: false,
            solo: false,
        }
    }
}

/// The full per-block parameter snapshot for the three-band processor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessorParams {
    pub low: BandParams,
    pub mid: BandParams,
    pub high: BandParams,

    /// Low/mid crossover frequency in Hz (roughly 20..999).
    pub crossover_low_mid_hz: f32,
    /// Mid/high crossover frequency in Hz (roughly 1000..20000).
    /// Must stay above `crossover_low_mid_hz`; the engine rejects an
    /// inverted pair.
    pub crossover_mid_high_hz: f32,

    /// Input trim in dB, applied before the band split (roughly -24..24).
    pub input_gain_db: f32,
    /// Output trim in dB, applied after recombination (roughly -24..24).
    pub output_gain_db: f32,
}

impl Default for ProcessorParams {
    fn default() -> Self {
        Self {
            low: BandParams::default(),
            mid: BandParams::default(),
            high: BandParams::default(),
            crossover_low_mid_hz: 400.0,
            crossover_mid_high_hz: 2_000.0,
            input_gain_db: 0.0,
            output_gain_db: 0.0,
        }
    }
}

impl ProcessorParams {
    pub fn band(&self, id: BandId) -> &BandParams {
        match id {
            BandId::Low => &self.low,
            BandId::Mid => &self.mid,
            BandId::High => &self.high,
        }
    }

    pub fn band_mut(&mut self, id: BandId) -> &mut BandParams {
        match id {
            BandId::Low => &mut self.low,
            BandId::Mid => &mut self.mid,
            BandId::High => &mut self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_inside_documented_ranges() {
        let params = ProcessorParams::default();
        assert!(params.crossover_low_mid_hz < params.crossover_mid_high_hz);
        for id in BandId::ALL {
            let band = params.band(id);
            assert!(band.ratio >= 1.0);
            assert!(band.attack_ms >= 5.0 && band.attack_ms <= 500.0);
            assert!(band.release_ms >= 5.0 && band.release_ms <= 500.0);
            assert!(!band.mute && !band.solo && !band.bypass);
        }
    }

    #[test]
    fn test_band_mut_targets_the_right_band() {
        let mut params = ProcessorParams::default();
        params.band_mut(BandId::Mid).threshold_db = -18.0;
        assert_eq!(params.mid.threshold_db, -18.0);
        assert_eq!(params.low.threshold_db, 0.0);
    }
}
