//! Gain staging primitives: decibel conversions, click-free trim ramps, and
//! the buffer arithmetic the band recombiner is built from.

/*
Decibels and Gain Staging
=========================

  gain          A linear multiplier applied to amplitude.
                  gain > 1.0  →  louder
                  gain = 1.0  →  unity (unchanged)
                  gain < 1.0  →  quieter

  decibel (dB)  Logarithmic level measure matching how we hear:
                  dB = 20 × log10(gain)
                  ×1.0 = 0 dB, ×0.5 ≈ -6 dB, ×2.0 ≈ +6 dB, ×0.0 = -∞ dB

  trim          A user-facing input or output gain, expressed in dB.

Jumping a trim between two values mid-stream produces an audible click:
the waveform gets a step discontinuity. The fix is to ramp the linear gain
from its current value to the target over a short, fixed window (~50 ms) -
slow enough to be inaudible, fast enough to feel immediate.
*/

/// The dB floor this crate treats as silence. Level detectors clamp here
/// instead of producing -inf from `log10(0)`.
pub const MINUS_INFINITY_DB: f32 = -120.0;

/// Convert decibels to a linear gain factor.
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Convert a linear gain factor to decibels, clamped at [`MINUS_INFINITY_DB`].
#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    if gain.abs() < 1e-6 {
        MINUS_INFINITY_DB
    } else {
        (20.0 * gain.abs().log10()).max(MINUS_INFINITY_DB)
    }
}

/// Add signal B into signal A in-place (summing).
#[inline]
pub fn sum_into(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// A linear gain with a fixed-duration ramp toward its target.
///
/// `set_target_db` never jumps the applied gain; `next_gain` walks it to the
/// target over the ramp window established by [`SmoothedGain::prepare`].
/// Used for the input and output trim stages.
#[derive(Debug, Clone)]
pub struct SmoothedGain {
    current: f32,
    target: f32,
    step: f32,
    ramp_samples: u32,
    remaining: u32,
}

/// Trim changes ramp over this window to avoid audible clicks.
pub const GAIN_RAMP_MS: f32 = 50.0;

impl SmoothedGain {
    pub fn new() -> Self {
        Self {
            current: 1.0,
            target: 1.0,
            step: 0.0,
            ramp_samples: 1,
            remaining: 0,
        }
    }

    /// Size the ramp window for `sample_rate` and snap to unity gain.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.ramp_samples = ((GAIN_RAMP_MS / 1000.0) * sample_rate).round().max(1.0) as u32;
        self.current = 1.0;
        self.target = 1.0;
        self.step = 0.0;
        self.remaining = 0;
    }

    /// Aim the ramp at a new target expressed in dB. A target equal to the
    /// one already in flight leaves the ramp untouched.
    pub fn set_target_db(&mut self, db: f32) {
        let target = db_to_gain(db);
        if (target - self.target).abs() < 1e-9 {
            return;
        }

        self.target = target;
        self.step = (target - self.current) / self.ramp_samples as f32;
        self.remaining = self.ramp_samples;
    }

    /// Advance one sample along the ramp and return the gain to apply.
    #[inline]
    pub fn next_gain(&mut self) -> f32 {
        if self.remaining > 0 {
            self.current += self.step;
            self.remaining -= 1;
            if self.remaining == 0 {
                self.current = self.target;
            }
        }
        self.current
    }

    /// Apply the ramping gain across a whole buffer.
    pub fn process(&mut self, buffer: &mut [f32]) {
        if self.remaining == 0 {
            // Settled: one multiply per sample, no per-sample bookkeeping.
            apply_gain(buffer, self.current);
            return;
        }

        for sample in buffer.iter_mut() {
            *sample *= self.next_gain();
        }
    }

    /// The gain currently being applied (mid-ramp values included).
    pub fn current_gain(&self) -> f32 {
        self.current
    }
}

impl Default for SmoothedGain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_gain_round_trip() {
        for db in [-24.0, -6.0, 0.0, 6.0, 24.0] {
            let back = gain_to_db(db_to_gain(db));
            assert!((back - db).abs() < 1e-3, "round trip failed for {} dB", db);
        }
    }

    #[test]
    fn test_gain_to_db_floors_at_silence() {
        assert_eq!(gain_to_db(0.0), MINUS_INFINITY_DB);
        assert_eq!(gain_to_db(1e-9), MINUS_INFINITY_DB);
    }

    #[test]
    fn test_sum_into() {
        let mut a = [1.0, 0.5, -0.5, -1.0];
        let b = [0.5, 0.5, 0.5, 0.5];
        sum_into(&mut a, &b);
        assert_eq!(a, [1.5, 1.0, 0.0, -0.5]);
    }

    #[test]
    fn test_apply_gain() {
        let mut signal = [1.0, -0.5];
        apply_gain(&mut signal, 0.5);
        assert_eq!(signal, [0.5, -0.25]);
    }

    #[test]
    fn test_smoothed_gain_reaches_target() {
        let sample_rate = 1_000.0;
        let mut gain = SmoothedGain::new();
        gain.prepare(sample_rate);
        gain.set_target_db(-6.0);

        let ramp_samples = ((GAIN_RAMP_MS / 1000.0) * sample_rate) as usize;
        let mut buffer = vec![1.0; ramp_samples + 8];
        gain.process(&mut buffer);

        let target = db_to_gain(-6.0);
        assert!(
            (buffer[ramp_samples + 4] - target).abs() < 1e-6,
            "gain should settle at the -6 dB target, got {}",
            buffer[ramp_samples + 4]
        );
    }

    #[test]
    fn test_smoothed_gain_has_no_jump() {
        let mut gain = SmoothedGain::new();
        gain.prepare(48_000.0);
        gain.set_target_db(12.0);

        let mut buffer = vec![1.0; 64];
        gain.process(&mut buffer);

        // First ramped sample must still be near unity, not at the target.
        assert!(
            buffer[0] < 1.01,
            "ramp must start from the current gain, got {}",
            buffer[0]
        );
        let mut prev = 0.0;
        for (i, &s) in buffer.iter().enumerate() {
            assert!(s >= prev, "ramp must rise monotonically at sample {}", i);
            prev = s;
        }
    }

    #[test]
    fn test_settled_gain_is_constant() {
        let mut gain = SmoothedGain::new();
        gain.prepare(1_000.0);
        gain.set_target_db(-6.0);

        let mut ramp = vec![1.0; 200];
        gain.process(&mut ramp);

        let mut buffer = vec![1.0; 16];
        gain.process(&mut buffer);
        let expected = db_to_gain(-6.0);
        for &s in &buffer {
            assert!((s - expected).abs() < 1e-6);
        }
    }
}
