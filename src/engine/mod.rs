//! Block-based orchestration: prepare-time sizing, per-block parameter
//! application, and the split → compress → recombine signal flow.

pub mod band;
pub mod splitter;

use crate::dsp::gain::{sum_into, SmoothedGain};
use crate::params::ProcessorParams;

use self::band::{Band, BandId};
use self::splitter::{BandSplitter, CrossoverError};

/// Immutable construction-time configuration, scoped to one engine
/// instance rather than held process-wide.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of audio channels the engine will serve.
    pub channels: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { channels: 2 }
    }
}

/// Crossover retunes smaller than this are skipped; sub-Hz wiggle from
/// automation does not warrant re-deriving ten biquads.
const CROSSOVER_EPSILON_HZ: f32 = 0.5;

/// The three-band dynamics processor.
///
/// Lifecycle: construct with [`MultibandProcessor::new`], call
/// [`MultibandProcessor::prepare`] once per stream (re)start or format
/// change, then call [`MultibandProcessor::process`] from the audio
/// callback. `process` performs no allocation, takes no locks, and always
/// completes synchronously for the samples presented; filter and envelope
/// state persist across blocks and reset only in `prepare`.
pub struct MultibandProcessor {
    config: EngineConfig,

    splitter: BandSplitter,
    bands: [Band; 3],
    input_trim: SmoothedGain,
    output_trim: SmoothedGain,

    sample_rate: f32,
    max_block_size: usize,
    // Last crossover pair actually installed, for cheap change detection.
    current_low_mid_hz: f32,
    current_mid_high_hz: f32,
}

impl MultibandProcessor {
    /// # Panics
    /// Panics if `config.channels` is zero.
    pub fn new(config: EngineConfig) -> Self {
        assert!(config.channels > 0, "engine needs at least one channel");
        Self {
            splitter: BandSplitter::new(config.channels),
            bands: [Band::new(), Band::new(), Band::new()],
            input_trim: SmoothedGain::new(),
            output_trim: SmoothedGain::new(),
            config,
            sample_rate: 0.0,
            max_block_size: 0,
            current_low_mid_hz: 0.0,
            current_mid_high_hz: 0.0,
        }
    }

    /// Size every buffer and derive every sample-rate-dependent value.
    ///
    /// Must run before the first `process` call and again on any sample
    /// rate or block size change. Resets all filter memory and compressor
    /// envelopes: this is the stream (re)start point. The initial
    /// crossover pair comes from `params` and must be valid.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        params: &ProcessorParams,
    ) -> Result<(), CrossoverError> {
        self.splitter.set_crossover_frequencies(
            params.crossover_low_mid_hz,
            params.crossover_mid_high_hz,
            sample_rate,
        )?;
        self.splitter.reset();
        self.current_low_mid_hz = params.crossover_low_mid_hz;
        self.current_mid_high_hz = params.crossover_mid_high_hz;

        for (band, id) in self.bands.iter_mut().zip(BandId::ALL) {
            band.prepare(sample_rate, self.config.channels, max_block_size);
            band.apply_params(params.band(id));
        }

        self.input_trim.prepare(sample_rate);
        self.output_trim.prepare(sample_rate);

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        Ok(())
    }

    /// Process one block in place.
    ///
    /// Flow: input trim → band split (fan-out copies) → per-band
    /// compression → recombination under solo/mute precedence → output
    /// trim. Returns an error (leaving the audio untouched) only when the
    /// block's crossover pair is invalid - a misconfiguration the caller
    /// must fix, not a runtime condition.
    ///
    /// # Panics
    /// Panics if `prepare` has not run, the channel count differs from the
    /// configured one, or a channel exceeds the prepared block size. All
    /// of these are caller bugs.
    pub fn process(
        &mut self,
        buffer: &mut [Vec<f32>],
        params: &ProcessorParams,
    ) -> Result<(), CrossoverError> {
        assert!(self.max_block_size > 0, "process called before prepare");
        assert_eq!(buffer.len(), self.config.channels, "channel count mismatch");
        let frames = buffer.first().map_or(0, |c| c.len());
        for channel in buffer.iter() {
            assert!(channel.len() == frames, "ragged channel lengths");
        }
        assert!(frames <= self.max_block_size, "block exceeds prepared size");

        self.apply_params(params)?;
        if frames == 0 {
            return Ok(());
        }

        // Input trim, one ramp value per frame shared by every channel.
        apply_trim(&mut self.input_trim, buffer, frames);

        // Fan out: each band gets its own filtered copy of the input.
        let [low, mid, high] = &mut self.bands;
        for (channel, input) in buffer.iter().enumerate() {
            self.splitter.split(
                &input[..frames],
                &mut low.buffer[channel][..frames],
                &mut mid.buffer[channel][..frames],
                &mut high.buffer[channel][..frames],
                channel,
            );
        }

        // Compress each band in place (bypassed bands pass through with
        // frozen envelopes).
        for band in self.bands.iter_mut() {
            for channel in 0..self.config.channels {
                band.compress(channel, frames);
            }
        }

        // Fan in: clear the output and sum the audible bands back together.
        let any_solo = self.bands.iter().any(|band| band.solo);
        for (channel, out) in buffer.iter_mut().enumerate() {
            out[..frames].fill(0.0);
            for band in self.bands.iter() {
                if band.is_audible(any_solo) {
                    sum_into(&mut out[..frames], &band.buffer[channel][..frames]);
                }
            }
        }

        apply_trim(&mut self.output_trim, buffer, frames);
        Ok(())
    }

    fn apply_params(&mut self, params: &ProcessorParams) -> Result<(), CrossoverError> {
        for (band, id) in self.bands.iter_mut().zip(BandId::ALL) {
            band.apply_params(params.band(id));
        }

        let moved = (params.crossover_low_mid_hz - self.current_low_mid_hz).abs()
            > CROSSOVER_EPSILON_HZ
            || (params.crossover_mid_high_hz - self.current_mid_high_hz).abs()
                > CROSSOVER_EPSILON_HZ;
        if moved {
            self.splitter.set_crossover_frequencies(
                params.crossover_low_mid_hz,
                params.crossover_mid_high_hz,
                self.sample_rate,
            )?;
            self.current_low_mid_hz = params.crossover_low_mid_hz;
            self.current_mid_high_hz = params.crossover_mid_high_hz;
        }

        self.input_trim.set_target_db(params.input_gain_db);
        self.output_trim.set_target_db(params.output_gain_db);
        Ok(())
    }

    /// Current smoothed gain reduction (dB) of one band on one channel -
    /// the value a meter would display.
    pub fn gain_reduction_db(&self, band: BandId, channel: usize) -> f32 {
        let index = match band {
            BandId::Low => 0,
            BandId::Mid => 1,
            BandId::High => 2,
        };
        self.bands[index].compressor.gain_reduction_db(channel)
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Clear all filter memory, compressor envelopes and trim ramps
    /// without resizing anything.
    pub fn reset(&mut self) {
        self.splitter.reset();
        for band in self.bands.iter_mut() {
            band.compressor.reset();
        }
        self.input_trim.prepare(self.sample_rate);
        self.output_trim.prepare(self.sample_rate);
    }
}

/// Apply a ramping trim across all channels, advancing the ramp once per
/// frame so every channel hears the identical gain trajectory.
fn apply_trim(trim: &mut SmoothedGain, buffer: &mut [Vec<f32>], frames: usize) {
    for i in 0..frames {
        let gain = trim.next_gain();
        for channel in buffer.iter_mut() {
            channel[i] *= gain;
        }
    }
}
