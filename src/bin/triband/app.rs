//! Triband - demo signal generator and audio stream runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use triband_dsp::{io, EngineConfig, MultibandProcessor, ProcessorParams, MAX_BLOCK_SIZE};

/// Demo application: generates a layered test signal, pushes it through the
/// multiband processor and plays the result.
pub struct Triband {
    params: ProcessorParams,
}

/// One pulsing tone layer of the demo signal.
struct ToneLayer {
    freq: f32,
    level: f32,
    pulse_hz: f32,
}

const LAYERS: [ToneLayer; 3] = [
    // Steady low rumble, a mid tone that swells, and a fast high shimmer:
    // enough spectral spread that each band audibly works on its own layer.
    ToneLayer { freq: 65.0, level: 0.5, pulse_hz: 0.0 },
    ToneLayer { freq: 990.0, level: 0.4, pulse_hz: 0.4 },
    ToneLayer { freq: 6_007.0, level: 0.25, pulse_hz: 2.5 },
];

impl Triband {
    pub fn new(params: ProcessorParams) -> Self {
        Self { params }
    }

    /// Run the demo (takes over, plays audio until interrupted).
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        println!("=== triband ===");
        println!("Sample rate: {} Hz", sample_rate);
        println!("Channels: {}", channels);
        println!(
            "Crossovers: {} Hz / {} Hz",
            self.params.crossover_low_mid_hz, self.params.crossover_mid_high_hz
        );
        println!("Playing... Press Ctrl+C to stop");
        println!();

        let params = self.params;
        let mut engine = MultibandProcessor::new(EngineConfig { channels });
        engine
            .prepare(sample_rate, MAX_BLOCK_SIZE, &params)
            .wrap_err("engine rejected the demo parameters")?;

        let mut planar = io::AudioBuffer::planar(channels, MAX_BLOCK_SIZE);
        let mut sample_clock = 0usize;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                    // Synthesize the layered test signal, identical on
                    // every channel.
                    for channel in planar.channels.iter_mut() {
                        for (i, out) in channel[..frames].iter_mut().enumerate() {
                            let t = (sample_clock + i) as f32 / sample_rate;
                            let mut s = 0.0;
                            for layer in &LAYERS {
                                let pulse = if layer.pulse_hz > 0.0 {
                                    let lfo =
                                        (std::f32::consts::TAU * layer.pulse_hz * t).sin();
                                    0.5 + 0.5 * lfo
                                } else {
                                    1.0
                                };
                                s += layer.level
                                    * pulse
                                    * (std::f32::consts::TAU * layer.freq * t).sin();
                            }
                            *out = s;
                        }
                    }

                    for channel in planar.channels.iter_mut() {
                        channel.truncate(frames);
                    }
                    if engine.process(&mut planar.channels, &params).is_err() {
                        // Demo parameters are validated in `prepare`; a
                        // failure here means the build is broken, so go
                        // silent rather than pass unprocessed audio.
                        for channel in planar.channels.iter_mut() {
                            channel.fill(0.0);
                        }
                    }

                    let out = &mut data
                        [frames_written * channels..(frames_written + frames) * channels];
                    io::interleave(&planar.channels, out);

                    for channel in planar.channels.iter_mut() {
                        channel.resize(MAX_BLOCK_SIZE, 0.0);
                    }
                    sample_clock += frames;
                    frames_written += frames;
                }
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;

        stream.play()?;

        loop {
            std::thread::sleep(std::time::Duration::from_millis(100));
        }
    }
}
