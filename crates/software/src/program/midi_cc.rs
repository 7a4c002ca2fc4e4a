use super::{Behavior, Input};
use crate::{
    midi::{CHANNEL, CvToCc},
    output::{CHANNEL_COUNT, Frame, levels},
};
use rand::RngCore;
use wmidi::MidiMessage;

/// MIDI controller numbers driving each output, from the first output to the last.
pub const CONTROLLERS: [u8; CHANNEL_COUNT] = [0, 1, 2, 3, 4, 5, 6, 7];

/// Sets output voltages from MIDI controllers, and sends the CV input out as a controller.
#[derive(Debug, Clone)]
pub struct MidiCc {
    levels: [u16; CHANNEL_COUNT],
    changed: bool,
    cv_to_cc: CvToCc,
    outgoing: Option<MidiMessage<'static>>,
}

impl Default for MidiCc {
    fn default() -> Self {
        Self {
            levels: [0; CHANNEL_COUNT],
            changed: true,
            cv_to_cc: CvToCc::default(),
            outgoing: None,
        }
    }
}

/// Scales a 7-bit controller value up to an output level.
pub fn controller_level(value: u8) -> u16 {
    u16::from(value) * 512
}

impl Behavior for MidiCc {
    fn tick(&mut self, input: Input, _rng: &mut dyn RngCore) -> Option<Frame> {
        if let Some(msg) = self.cv_to_cc.convert(input.sample) {
            self.outgoing = Some(msg);
        }

        if self.changed {
            self.changed = false;
            Some(levels(self.levels))
        } else {
            None
        }
    }

    fn receive_midi(&mut self, msg: &MidiMessage<'_>) {
        if let MidiMessage::ControlChange(channel, control, value) = *msg {
            if channel != CHANNEL {
                return;
            }
            let control = u8::from(control.0);
            if let Some(index) = CONTROLLERS.iter().position(|&c| c == control) {
                self.levels[index] = controller_level(u8::from(value));
                self.changed = true;
            }
        }
    }

    fn take_midi(&mut self) -> Option<MidiMessage<'static>> {
        self.outgoing.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pattern::test_rng::ScriptedRng, program::tests::input};
    use wmidi::{Channel, ControlFunction, U7};

    fn cc(control: u8, value: u8) -> MidiMessage<'static> {
        MidiMessage::ControlChange(
            Channel::Ch1,
            ControlFunction(U7::from_u8_lossy(control)),
            U7::from_u8_lossy(value),
        )
    }

    #[test]
    fn controllers_set_levels() {
        let mut rng = ScriptedRng::new([0]);
        let mut cc_outputs = MidiCc::default();
        cc_outputs.tick(input(0), &mut rng);

        cc_outputs.receive_midi(&cc(0, 127));
        cc_outputs.receive_midi(&cc(5, 64));
        assert_eq!(
            Some(levels([65024, 0, 0, 0, 0, 32768, 0, 0])),
            cc_outputs.tick(input(0), &mut rng),
            "Expected left but got right"
        );
    }

    #[test]
    fn other_channels_are_ignored() {
        let mut rng = ScriptedRng::new([0]);
        let mut cc_outputs = MidiCc::default();
        cc_outputs.tick(input(0), &mut rng);
        cc_outputs.receive_midi(&MidiMessage::ControlChange(
            Channel::Ch10,
            ControlFunction(U7::from_u8_lossy(0)),
            U7::from_u8_lossy(127),
        ));
        assert_eq!(
            None,
            cc_outputs.tick(input(0), &mut rng),
            "Channel 10 should be ignored"
        );
    }

    #[test]
    fn other_controllers_are_ignored() {
        let mut rng = ScriptedRng::new([0]);
        let mut cc_outputs = MidiCc::default();
        cc_outputs.tick(input(0), &mut rng);
        cc_outputs.receive_midi(&cc(64, 127));
        assert_eq!(None, cc_outputs.tick(input(0), &mut rng));
    }
}
