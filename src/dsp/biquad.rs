//! Second-order IIR filter section with per-channel state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| kind     | passes            | rejects          | role in the crossover        |
| -------- | ----------------- | ---------------- | ---------------------------- |
| low-pass | below cutoff      | above cutoff     | band splitting               |
| high-pass| above cutoff      | below cutoff     | band splitting               |
| all-pass | everything        | nothing (phase-  | phase-aligning the branch    |
|          |                   | shifts instead)  | that skips a filter stage    |
*/

/// Which coefficient set a [`Biquad`] derives and applies.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Allpass,
}

/// Errors from configuring a filter with values outside its valid domain.
///
/// Surfaced to the caller immediately; the filter never clamps internally.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Cutoff must lie strictly between 0 Hz and Nyquist.
    CutoffOutOfRange { cutoff_hz: f32, nyquist_hz: f32 },
    /// Quality factor must be strictly positive.
    NonPositiveQ { q: f32 },
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::CutoffOutOfRange { cutoff_hz, nyquist_hz } => {
                write!(
                    f,
                    "cutoff {} Hz outside the open interval (0, {}) Hz",
                    cutoff_hz, nyquist_hz
                )
            }
            FilterError::NonPositiveQ { q } => {
                write!(f, "quality factor must be > 0, got {}", q)
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// The five coefficients of a second-order section: `a*` feed-forward,
/// `b*` feed-back, already normalized by the derivation's 1+alpha term.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiquadCoefficients {
    pub a0: f32,
    pub a1: f32,
    pub a2: f32,
    pub b1: f32,
    pub b2: f32,
}

impl BiquadCoefficients {
    /// Derive coefficients for `kind` at `cutoff_hz`/`q` (Bristow-Johnson
    /// cookbook formulas).
    pub fn derive(
        cutoff_hz: f32,
        q: f32,
        kind: FilterKind,
        sample_rate: f32,
    ) -> Result<Self, FilterError> {
        let nyquist_hz = sample_rate * 0.5;
        if cutoff_hz <= 0.0 || cutoff_hz >= nyquist_hz {
            return Err(FilterError::CutoffOutOfRange { cutoff_hz, nyquist_hz });
        }
        if q <= 0.0 {
            return Err(FilterError::NonPositiveQ { q });
        }

        let w0 = std::f32::consts::TAU * cutoff_hz / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);
        let norm = 1.0 + alpha;

        let coefficients = match kind {
            FilterKind::Lowpass => Self {
                a0: (1.0 - cos_w0) / 2.0 / norm,
                a1: (1.0 - cos_w0) / norm,
                a2: (1.0 - cos_w0) / 2.0 / norm,
                b1: -2.0 * cos_w0 / norm,
                b2: (1.0 - alpha) / norm,
            },
            FilterKind::Highpass => Self {
                a0: (1.0 + cos_w0) / 2.0 / norm,
                a1: -(1.0 + cos_w0) / norm,
                a2: (1.0 + cos_w0) / 2.0 / norm,
                b1: -2.0 * cos_w0 / norm,
                b2: (1.0 - alpha) / norm,
            },
            // Numerator is the mirrored denominator: unity magnitude at
            // every frequency, phase rotating through the cutoff.
            FilterKind::Allpass => Self {
                a0: (1.0 - alpha) / norm,
                a1: -2.0 * cos_w0 / norm,
                a2: (1.0 + alpha) / norm,
                b1: -2.0 * cos_w0 / norm,
                b2: (1.0 - alpha) / norm,
            },
        };

        Ok(coefficients)
    }
}

/// Per-channel filter memory: the two delay elements of the transposed
/// direct-form II recursion. Owned by exactly one [`Biquad`], never shared.
#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    s1: f32,
    s2: f32,
}

/// A single second-order IIR section.
///
/// Construct with the channel count it will serve, configure with
/// [`Biquad::set_parameters`], then feed it one sample at a time per
/// channel. The per-sample path does no allocation and no locking.
#[derive(Debug, Clone)]
pub struct Biquad {
    coefficients: BiquadCoefficients,
    kind: FilterKind,
    state: Vec<ChannelState>,
}

impl Biquad {
    /// A unity-gain section with zeroed state for `channels` channels.
    pub fn new(channels: usize) -> Self {
        Self {
            coefficients: BiquadCoefficients {
                a0: 1.0,
                ..BiquadCoefficients::default()
            },
            kind: FilterKind::Lowpass,
            state: vec![ChannelState::default(); channels],
        }
    }

    /// Derive and install coefficients for the given cutoff, Q and kind.
    ///
    /// Fails if `cutoff_hz` is outside (0, Nyquist) or `q <= 0`; existing
    /// coefficients are left untouched on failure. Filter memory is kept, so
    /// retuning mid-stream does not click.
    pub fn set_parameters(
        &mut self,
        cutoff_hz: f32,
        q: f32,
        kind: FilterKind,
        sample_rate: f32,
    ) -> Result<(), FilterError> {
        self.coefficients = BiquadCoefficients::derive(cutoff_hz, q, kind, sample_rate)?;
        self.kind = kind;
        Ok(())
    }

    /// Filter one sample for one channel.
    ///
    /// Transposed direct-form II: the feedback terms operate on the running
    /// delay elements, which keeps the recursion numerically well behaved.
    ///
    /// # Panics
    /// Panics if `channel` was not allocated at construction. That is a
    /// caller bug, not a runtime condition to recover from.
    #[inline]
    pub fn process(&mut self, sample: f32, channel: usize) -> f32 {
        let c = self.coefficients;
        let state = &mut self.state[channel];

        let out = c.a0 * sample + state.s1;
        state.s1 = c.a1 * sample - c.b1 * out + state.s2;
        state.s2 = c.a2 * sample - c.b2 * out;
        out
    }

    /// Zero all channel memory. Coefficients are untouched.
    pub fn reset(&mut self) {
        for state in self.state.iter_mut() {
            *state = ChannelState::default();
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn channels(&self) -> usize {
        self.state.len()
    }
}
