//! Feedforward log-domain compressor with asymmetric envelope smoothing.

/*
Feedforward Compression
=======================

A compressor turns down the loud parts of a signal. "Feedforward" means the
gain it applies is computed from the incoming level directly, never fed back
from its own output.

Vocabulary
----------

  threshold     Level (dB) above which compression engages.

  ratio         How hard levels above threshold are squeezed. A 4:1 ratio
                turns 4 dB of input overshoot into 1 dB of output overshoot.
                Ratio 1:1 is no compression at all.

  attack        Time constant (ms) for the gain reduction to engage when the
                level rises. Short = grabs transients, long = lets them through.

  release       Time constant (ms) for the gain reduction to let go when the
                level falls. Always the slower of the two in practice.

  makeup gain   Fixed dB boost after compression, restoring the loudness the
                gain reduction took away.

The per-sample pipeline (all in the log domain until the final step):

    x ──► level (dB) ──► static curve ──► demand ──► smoothing ──► gain ──► ×

  1. level:      xg = 20·log10(|x|), floored at -120 dB near silence
  2. curve:      yg = threshold + (xg - threshold)/ratio   (above threshold)
  3. demand:     xl = xg - yg            how many dB we want to remove
  4. smoothing:  one-pole toward xl; the attack coefficient when demand is
                 rising, the release coefficient when it is falling. The
                 branch is re-chosen every sample - nothing is latched.
  5. apply:      gain = 10^((makeup - yl)/20), output = x · gain

Smoothing coefficients derive from time constants the usual way:

    alpha = exp(-1 / (tau_ms · sample_rate / 1000))

tau near zero drives alpha toward zero, which makes the smoother track the
demand nearly instantaneously.

Each channel owns its own smoothed level. Sharing one level across a stereo
pair leaks envelope movement between channels (audible as image wobble), so
the state here is an array indexed by channel, exactly like the filter
sections keep their memory.
*/

use crate::dsp::gain::MINUS_INFINITY_DB;

/// Signal magnitudes below this are treated as silence by the level
/// detector, flooring the dB computation instead of producing -inf.
const LEVEL_FLOOR: f32 = 1e-6;

/// A feedforward compressor for one band of audio.
///
/// Call [`Compressor::prepare`] before processing; it sizes the per-channel
/// envelope state and derives the smoothing coefficients for the sample
/// rate. The per-sample path allocates nothing.
#[derive(Debug, Clone)]
pub struct Compressor {
    threshold_db: f32,
    ratio: f32,
    makeup_db: f32,
    attack_ms: f32,
    release_ms: f32,

    alpha_attack: f32,
    alpha_release: f32,
    sample_rate: f32,

    // Smoothed gain-reduction level (dB), one slot per channel. Persists
    // across blocks; reset only by `prepare` or `reset`.
    level_db: Vec<f32>,
}

impl Compressor {
    pub fn new() -> Self {
        Self {
            threshold_db: 0.0,
            ratio: 1.0,
            makeup_db: 0.0,
            attack_ms: 10.0,
            release_ms: 100.0,
            alpha_attack: 0.0,
            alpha_release: 0.0,
            sample_rate: 0.0,
            level_db: Vec::new(),
        }
    }

    /// Size state for `channels` and derive coefficients for `sample_rate`.
    ///
    /// Clears the envelope memory: this is the stream (re)start point.
    pub fn prepare(&mut self, sample_rate: f32, channels: usize) {
        self.sample_rate = sample_rate;
        self.alpha_attack = Self::smoothing_coefficient(self.attack_ms, sample_rate);
        self.alpha_release = Self::smoothing_coefficient(self.release_ms, sample_rate);
        self.level_db.clear();
        self.level_db.resize(channels, 0.0);
    }

    fn smoothing_coefficient(tau_ms: f32, sample_rate: f32) -> f32 {
        debug_assert!(tau_ms >= 0.0, "time constant must not be negative");
        (-1.0 / (tau_ms * sample_rate / 1000.0)).exp()
    }

    /// Threshold in dB; levels above it are compressed.
    pub fn set_threshold(&mut self, threshold_db: f32) {
        self.threshold_db = threshold_db;
    }

    /// Compression ratio. Must be positive; 1.0 degenerates to unity gain.
    pub fn set_ratio(&mut self, ratio: f32) {
        debug_assert!(ratio > 0.0, "ratio must be positive");
        self.ratio = ratio;
    }

    /// Makeup gain in dB applied after gain reduction.
    pub fn set_makeup(&mut self, makeup_db: f32) {
        self.makeup_db = makeup_db;
    }

    /// Attack time constant in ms. Re-derives the smoothing coefficient.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms;
        if self.sample_rate > 0.0 {
            self.alpha_attack = Self::smoothing_coefficient(attack_ms, self.sample_rate);
        }
    }

    /// Release time constant in ms. Re-derives the smoothing coefficient.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms;
        if self.sample_rate > 0.0 {
            self.alpha_release = Self::smoothing_coefficient(release_ms, self.sample_rate);
        }
    }

    /// Compress one sample of one channel.
    ///
    /// # Panics
    /// Panics if `channel` was not allocated by [`Compressor::prepare`].
    #[inline]
    pub fn process(&mut self, sample: f32, channel: usize) -> f32 {
        let level_db = &mut self.level_db[channel];

        let magnitude = sample.abs();
        let xg = if magnitude < LEVEL_FLOOR {
            MINUS_INFINITY_DB
        } else {
            20.0 * magnitude.log10()
        };

        let yg = if xg >= self.threshold_db {
            self.threshold_db + (xg - self.threshold_db) / self.ratio
        } else {
            xg
        };

        let xl = xg - yg;

        let yl = if xl > *level_db {
            self.alpha_attack * *level_db + (1.0 - self.alpha_attack) * xl
        } else {
            self.alpha_release * *level_db + (1.0 - self.alpha_release) * xl
        };
        *level_db = yl;

        let gain = 10.0_f32.powf((self.makeup_db - yl) / 20.0);
        sample * gain
    }

    /// Compress a whole channel buffer in place.
    pub fn process_buffer(&mut self, buffer: &mut [f32], channel: usize) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample, channel);
        }
    }

    /// Current smoothed gain reduction (dB, >= 0) for `channel` - the value
    /// a meter would display.
    pub fn gain_reduction_db(&self, channel: usize) -> f32 {
        self.level_db[channel]
    }

    /// Clear the envelope memory of every channel. Parameters are kept.
    pub fn reset(&mut self) {
        for level in self.level_db.iter_mut() {
            *level = 0.0;
        }
    }

    pub fn channels(&self) -> usize {
        self.level_db.len()
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}
