use super::{Behavior, Input};
use crate::{
    cv::CvSample,
    output::{CHANNEL_COUNT, Frame, gates},
};
use embassy_time::{Duration, Instant};
use rand::RngCore;

/// A free-running clock divider. Each beat advances a counter; the first output is high on every second beat, the next
/// on every fourth, and so on up to every 256th.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    counter: u32,
    next_beat: Option<Instant>,
}

/// Tempo selected by the CV input, in beats per minute.
///
/// Tempo follows the magnitude of the bipolar input, so it rises either side of 0 V. It never drops below one beat per minute.
pub fn bpm(sample: CvSample) -> u64 {
    u64::from(sample.bipolar_magnitude() / 100).max(1)
}

/// Time between beats at the tempo selected by the CV input.
pub fn beat_period(sample: CvSample) -> Duration {
    Duration::from_micros(60_000_000 / bpm(sample))
}

/// Which outputs are high on a given beat.
pub fn divisions(counter: u32) -> [bool; CHANNEL_COUNT] {
    core::array::from_fn(|n| counter % (2 << n) == 0)
}

impl Behavior for Clock {
    fn tick(&mut self, input: Input, _rng: &mut dyn RngCore) -> Option<Frame> {
        if self.next_beat.is_some_and(|beat| input.now < beat) {
            return None;
        }
        // the counter is a multiple of every division's period when it wraps, so wrapping is seamless
        self.counter = self.counter.wrapping_add(1);
        self.next_beat = Some(input.now + beat_period(input.sample));
        Some(gates(divisions(self.counter)))
    }
}
