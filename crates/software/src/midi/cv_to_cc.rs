use crate::cv::CvSample;
use wmidi::{Channel, ControlFunction, MidiMessage, U7};

/// Readings below this are treated as the bottom of the input's usable range.
pub const CV_FLOOR: u16 = 5900;
/// Readings above this are treated as the top of the input's usable range.
pub const CV_CEILING: u16 = 64300;
/// The input has to move by more than this before it is converted again, which keeps ADC noise off the MIDI bus.
pub const CV_CHANGE_THRESHOLD: u16 = 256;

/// Converts the CV input into Control Change messages.
///
/// A message is only produced when the input has moved appreciably and the resulting 7-bit value differs from the one
/// last produced.
#[derive(Debug, Clone, Copy)]
pub struct CvToCc {
    channel: Channel,
    control: ControlFunction,
    previous_sample: CvSample,
    previous_value: U7,
}

impl CvToCc {
    /// Constructs a [`CvToCc`] sending on the given channel and controller.
    pub fn new(channel: Channel, control: ControlFunction) -> Self {
        Self {
            channel,
            control,
            previous_sample: CvSample::default(),
            previous_value: U7::from_u8_lossy(0),
        }
    }

    /// Considers a new reading, returning the message to send, if any.
    pub fn convert(&mut self, sample: CvSample) -> Option<MidiMessage<'static>> {
        if sample.value().abs_diff(self.previous_sample.value()) <= CV_CHANGE_THRESHOLD {
            return None;
        }
        self.previous_sample = sample;

        let value = cc_value(sample);
        if value == self.previous_value {
            return None;
        }
        self.previous_value = value;

        Some(MidiMessage::ControlChange(self.channel, self.control, value))
    }
}

impl Default for CvToCc {
    /// The modulation wheel on [`CHANNEL`][super::CHANNEL].
    fn default() -> Self {
        Self::new(super::CHANNEL, ControlFunction::MODULATION_WHEEL)
    }
}

/// Maps the usable range of the input onto the 7-bit range of a controller.
fn cc_value(sample: CvSample) -> U7 {
    let clamped = sample.value().clamp(CV_FLOOR, CV_CEILING);
    let value = u32::from(clamped - CV_FLOOR) * 127 / u32::from(CV_CEILING - CV_FLOOR);
    U7::from_u8_lossy(value as u8)
}
