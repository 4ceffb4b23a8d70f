//! 4th-order Linkwitz-Riley crossover section.
//!
//! A Linkwitz-Riley filter cascades two identical 2nd-order Butterworth
//! sections (Q = 1/√2), doubling the slope from 12 dB/oct to 24 dB/oct.
//! The matched lowpass/highpass pair sums back to a flat magnitude response
//! with a known phase offset, which is what makes it usable as an audio
//! crossover: the split is inaudible once the bands are recombined.
//!
//! The allpass kind cascades the matching 2nd-order allpass twice. It has
//! the same phase rotation as a lowpass/highpass pair at the same frequency
//! and is used to phase-align a branch that skips a crossover stage.

use crate::dsp::biquad::{Biquad, FilterError, FilterKind};

/// Butterworth quality factor; cascading two of these yields Linkwitz-Riley.
pub const BUTTERWORTH_Q: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// A 24 dB/oct crossover filter: two cascaded Butterworth biquads per kind,
/// all three kinds tuned to one shared crossover frequency.
///
/// The active [`FilterKind`] selects which cascade `process` runs; switching
/// kinds does not disturb the state of the other cascades.
#[derive(Debug, Clone)]
pub struct LinkwitzRileySection {
    lowpass: [Biquad; 2],
    highpass: [Biquad; 2],
    allpass: [Biquad; 2],
    kind: FilterKind,
}

impl LinkwitzRileySection {
    /// An untuned section for `channels` channels, defaulting to lowpass.
    /// Call [`LinkwitzRileySection::set_crossover_frequency`] before use.
    pub fn new(channels: usize) -> Self {
        Self {
            lowpass: [Biquad::new(channels), Biquad::new(channels)],
            highpass: [Biquad::new(channels), Biquad::new(channels)],
            allpass: [Biquad::new(channels), Biquad::new(channels)],
            kind: FilterKind::Lowpass,
        }
    }

    /// Retune all three cascades to `crossover_hz` at Butterworth Q.
    ///
    /// Fails (leaving every cascade untouched) if the frequency falls outside
    /// (0, Nyquist).
    pub fn set_crossover_frequency(
        &mut self,
        crossover_hz: f32,
        sample_rate: f32,
    ) -> Result<(), FilterError> {
        // Validate once up front so a failure cannot leave the cascades
        // tuned to different frequencies.
        crate::dsp::biquad::BiquadCoefficients::derive(
            crossover_hz,
            BUTTERWORTH_Q,
            FilterKind::Lowpass,
            sample_rate,
        )?;

        for stage in self.lowpass.iter_mut() {
            stage.set_parameters(crossover_hz, BUTTERWORTH_Q, FilterKind::Lowpass, sample_rate)?;
        }
        for stage in self.highpass.iter_mut() {
            stage.set_parameters(crossover_hz, BUTTERWORTH_Q, FilterKind::Highpass, sample_rate)?;
        }
        for stage in self.allpass.iter_mut() {
            stage.set_parameters(crossover_hz, BUTTERWORTH_Q, FilterKind::Allpass, sample_rate)?;
        }
        Ok(())
    }

    /// Select which cascade `process` applies.
    pub fn set_kind(&mut self, kind: FilterKind) {
        self.kind = kind;
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Run one sample of one channel through the active cascade.
    ///
    /// # Panics
    /// Panics if `channel` was not allocated at construction.
    #[inline]
    pub fn process(&mut self, sample: f32, channel: usize) -> f32 {
        let stages = match self.kind {
            FilterKind::Lowpass => &mut self.lowpass,
            FilterKind::Highpass => &mut self.highpass,
            FilterKind::Allpass => &mut self.allpass,
        };
        let first = stages[0].process(sample, channel);
        stages[1].process(first, channel)
    }

    /// Zero the filter memory of all three cascades.
    pub fn reset(&mut self) {
        for stage in self
            .lowpass
            .iter_mut()
            .chain(self.highpass.iter_mut())
            .chain(self.allpass.iter_mut())
        {
            stage.reset();
        }
    }
}
