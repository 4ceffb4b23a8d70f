// Purpose - external interfaces, buffer layout conversions

/// A planar (channel × sample) block of audio, the layout the engine
/// processes in place.
#[derive(Debug, Default)]
pub struct AudioBuffer {
    pub channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Allocate a zeroed planar buffer.
    pub fn planar(channels: usize, frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; channels],
        }
    }

    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, |c| c.len())
    }
}

/// Scatter an interleaved frame stream (the layout audio devices speak)
/// into planar channel buffers. `planar` must already be sized
/// `channels × frames`.
///
/// # Panics
/// Panics if the planar shape does not match the interleaved length.
pub fn deinterleave(interleaved: &[f32], planar: &mut [Vec<f32>]) {
    let channels = planar.len();
    assert!(channels > 0);
    assert_eq!(interleaved.len() % channels, 0);
    let frames = interleaved.len() / channels;
    for channel in planar.iter() {
        assert_eq!(channel.len(), frames);
    }

    for (i, frame) in interleaved.chunks_exact(channels).enumerate() {
        for (channel, &sample) in planar.iter_mut().zip(frame.iter()) {
            channel[i] = sample;
        }
    }
}

/// Gather planar channel buffers back into an interleaved frame stream.
///
/// # Panics
/// Panics if the shapes disagree.
pub fn interleave(planar: &[Vec<f32>], interleaved: &mut [f32]) {
    let channels = planar.len();
    assert!(channels > 0);
    assert_eq!(interleaved.len() % channels, 0);
    let frames = interleaved.len() / channels;
    for channel in planar.iter() {
        assert_eq!(channel.len(), frames);
    }

    for (i, frame) in interleaved.chunks_exact_mut(channels).enumerate() {
        for (channel, out) in planar.iter().zip(frame.iter_mut()) {
            *out = channel[i];
        }
    }
}
