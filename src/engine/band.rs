//! A band: one compressor, its routing flags, and its signal buffer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::compressor::Compressor;
use crate::params::BandParams;

/// Identifies one of the three frequency bands.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandId {
    Low,
    Mid,
    High,
}

impl BandId {
    pub const ALL: [BandId; 3] = [BandId::Low, BandId::Mid, BandId::High];
}

/// One processing band, owned by the engine. Holds the compressor, the
/// routing flags read once per block, and the dedicated channel×sample
/// buffer the splitter fans out into.
#[derive(Debug)]
pub(crate) struct Band {
    pub compressor: Compressor,
    pub bypass: bool,
    pub mute: bool,
    pub solo: bool,
    /// channel × sample scratch, sized once in `prepare`.
    pub buffer: Vec<Vec<f32>>,
}

impl Band {
    pub fn new() -> Self {
        Self {
            compressor: Compressor::new(),
            bypass: false,
            mute: false,
            solo: false,
            buffer: Vec::new(),
        }
    }

    /// Allocate the band buffer and prime the compressor. Called from the
    /// engine's `prepare` only; nothing here may run on the audio callback.
    pub fn prepare(&mut self, sample_rate: f32, channels: usize, max_block_size: usize) {
        self.compressor.prepare(sample_rate, channels);
        self.buffer.clear();
        self.buffer.resize(channels, Vec::new());
        for channel in self.buffer.iter_mut() {
            channel.clear();
            channel.resize(max_block_size, 0.0);
        }
    }

    /// Copy this block's control values onto the band. Attack/release
    /// coefficient recomputation happens inside the compressor setters,
    /// only when the value actually changed.
    pub fn apply_params(&mut self, params: &BandParams) {
        self.compressor.set_threshold(params.threshold_db);
        self.compressor.set_ratio(params.ratio);
        self.compressor.set_makeup(params.makeup_db);
        self.compressor.set_attack_ms(params.attack_ms);
        self.compressor.set_release_ms(params.release_ms);
        self.bypass = params.bypass;
        self.mute = params.mute;
        self.solo = params.solo;
    }

    /// Whether this band contributes to the recombined output, given
    /// whether any band in the engine is currently soloed. Solo takes
    /// precedence over mute.
    pub fn is_audible(&self, any_solo: bool) -> bool {
        if any_solo {
            self.solo
        } else {
            !self.mute
        }
    }

    /// Run the band's compressor in place over one channel of its buffer.
    /// A bypassed band is left untouched: the signal passes through and the
    /// envelope state stays frozen at its pre-bypass level.
    pub fn compress(&mut self, channel: usize, frames: usize) {
        if self.bypass {
            return;
        }
        self.compressor
            .process_buffer(&mut self.buffer[channel][..frames], channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solo_takes_precedence_over_mute() {
        let mut band = Band::new();
        band.mute = true;
        band.solo = true;
        assert!(band.is_audible(true), "muted+soloed band must be audible");

        band.solo = false;
        assert!(!band.is_audible(false), "muted band must drop out");
        assert!(!band.is_audible(true), "unsoloed band drops when others solo");
    }

    #[test]
    fn test_bypass_freezes_envelope() {
        let mut band = Band::new();
        band.prepare(48_000.0, 1, 64);
        band.apply_params(&BandParams {
            threshold_db: -20.0,
            ratio: 4.0,
            attack_ms: 1.0,
            release_ms: 1.0,
            ..BandParams::default()
        });

        // Drive the envelope up with a hot signal.
        for s in band.buffer[0].iter_mut() {
            *s = 0.9;
        }
        band.compress(0, 64);
        let engaged = band.compressor.gain_reduction_db(0);
        assert!(engaged > 1.0);

        // Bypassed: the buffer passes through untouched and the envelope
        // holds its pre-bypass level instead of releasing.
        band.bypass = true;
        for s in band.buffer[0].iter_mut() {
            *s = 0.0;
        }
        band.compress(0, 64);
        assert!(band.buffer[0].iter().all(|&s| s == 0.0));
        assert_eq!(band.compressor.gain_reduction_db(0), engaged);
    }
}
