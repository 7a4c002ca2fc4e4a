use super::{Behavior, Input};
use crate::{
    cv::CvSample,
    output::{CHANNEL_COUNT, Frame, gates},
};
use rand::RngCore;

/// Width of the slice of input range that selects each output.
pub const SELECTOR_STEP: u16 = 4096;

/// Exactly one output is high; which one depends on where the CV input sits within its half of the range.
#[derive(Debug, Clone, Default)]
pub struct GateSelector {
    active: Option<usize>,
}

/// Returns the index of the output selected by a sample.
///
/// The input range is split into sixteen slices of [`SELECTOR_STEP`]. Each half of the range sweeps the outputs from
/// the first to the last, so the slice just below the centre selects the last output and the centre selects the first
/// one again.
pub fn selected_gate(sample: CvSample) -> usize {
    usize::from(sample.value() / SELECTOR_STEP) % CHANNEL_COUNT
}

impl Behavior for GateSelector {
    fn tick(&mut self, input: Input, _rng: &mut dyn RngCore) -> Option<Frame> {
        let selected = selected_gate(input.sample);
        if self.active == Some(selected) {
            return None;
        }
        self.active = Some(selected);

        let mut frame = [false; CHANNEL_COUNT];
        frame[selected] = true;
        Some(gates(frame))
    }
}
