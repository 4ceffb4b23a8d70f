//! Lock-free parameter flow from a control thread to the audio thread.
//!
//! The engine itself only ever sees a [`ProcessorParams`] snapshot per
//! block. This module is the plumbing that gets edits there without locks:
//! a UI or automation thread pushes [`ParamUpdate`] values into an SPSC
//! ring, and the audio thread drains them onto its local snapshot at the
//! top of each block. Draining allocates nothing and never blocks; if the
//! ring fills up, the push side is told and can retry or coalesce.
//!
//! No atomic snapshot across several fields is promised - two updates may
//! land in different blocks - which is exactly the tolerance the engine
//! documents for its parameters.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::engine::band::BandId;
use crate::params::ProcessorParams;

/// One field edit targeting a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandUpdate {
    ThresholdDb(f32),
    Ratio(f32),
    AttackMs(f32),
    ReleaseMs(f32),
    MakeupDb(f32),
    Bypass(bool),
    Mute(bool),
    Solo(bool),
}

/// One field edit targeting the processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamUpdate {
    Band(BandId, BandUpdate),
    CrossoverLowMidHz(f32),
    CrossoverMidHighHz(f32),
    InputGainDb(f32),
    OutputGainDb(f32),
}

impl ParamUpdate {
    /// Fold this edit into a parameter snapshot.
    pub fn apply(self, params: &mut ProcessorParams) {
        match self {
            ParamUpdate::Band(id, update) => {
                let band = params.band_mut(id);
                match update {
                    BandUpdate::ThresholdDb(v) => band.threshold_db = v,
                    BandUpdate::Ratio(v) => band.ratio = v,
                    BandUpdate::AttackMs(v) => band.attack_ms = v,
                    BandUpdate::ReleaseMs(v) => band.release_ms = v,
                    BandUpdate::MakeupDb(v) => band.makeup_db = v,
                    BandUpdate::Bypass(v) => band.bypass = v,
                    BandUpdate::Mute(v) => band.mute = v,
                    BandUpdate::Solo(v) => band.solo = v,
                }
            }
            ParamUpdate::CrossoverLowMidHz(v) => params.crossover_low_mid_hz = v,
            ParamUpdate::CrossoverMidHighHz(v) => params.crossover_mid_high_hz = v,
            ParamUpdate::InputGainDb(v) => params.input_gain_db = v,
            ParamUpdate::OutputGainDb(v) => params.output_gain_db = v,
        }
    }
}

/// Control-thread half: push edits toward the audio thread.
pub struct ParamSender {
    producer: Producer<ParamUpdate>,
}

impl ParamSender {
    /// Push one edit. Returns the edit back if the ring is full so the
    /// caller can coalesce and retry; nothing ever blocks.
    pub fn send(&mut self, update: ParamUpdate) -> Result<(), ParamUpdate> {
        self.producer.push(update).map_err(|e| match e {
            rtrb::PushError::Full(update) => update,
        })
    }
}

/// Audio-thread half: drain pending edits at the top of a block.
pub struct ParamReceiver {
    consumer: Consumer<ParamUpdate>,
}

impl ParamReceiver {
    /// Apply every pending edit to `params`, newest last. Allocation-free.
    pub fn drain_into(&mut self, params: &mut ProcessorParams) {
        while let Ok(update) = self.consumer.pop() {
            update.apply(params);
        }
    }
}

/// Build the two halves of a parameter ring holding up to `capacity`
/// in-flight edits.
pub fn param_channel(capacity: usize) -> (ParamSender, ParamReceiver) {
    let (producer, consumer) = RingBuffer::new(capacity);
    (ParamSender { producer }, ParamReceiver { consumer })
}
