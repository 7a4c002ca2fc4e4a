use super::{Behavior, Input};
use crate::{
    midi::{CHANNEL, CvToCc},
    output::{CHANNEL_COUNT, Frame, gates},
};
use rand::RngCore;
use wmidi::{MidiMessage, Note};

/// MIDI note numbers played by each output, from the first output to the last.
pub const NOTES: [u8; CHANNEL_COUNT] = [60, 61, 62, 63, 64, 65, 66, 67];

/// Plays gates from MIDI notes, and sends the CV input out as a controller.
#[derive(Debug, Clone)]
pub struct MidiNotes {
    gates: [bool; CHANNEL_COUNT],
    changed: bool,
    cv_to_cc: CvToCc,
    outgoing: Option<MidiMessage<'static>>,
}

impl Default for MidiNotes {
    fn default() -> Self {
        Self {
            gates: [false; CHANNEL_COUNT],
            // write the initial state on the first tick
            changed: true,
            cv_to_cc: CvToCc::default(),
            outgoing: None,
        }
    }
}

impl MidiNotes {
    fn play(&mut self, note: Note, on: bool) {
        if let Some(index) = NOTES.iter().position(|&n| n == u8::from(note)) {
            self.gates[index] = on;
            self.changed = true;
        }
    }
}

impl Behavior for MidiNotes {
    fn tick(&mut self, input: Input, _rng: &mut dyn RngCore) -> Option<Frame> {
        if let Some(msg) = self.cv_to_cc.convert(input.sample) {
            self.outgoing = Some(msg);
        }

        if self.changed {
            self.changed = false;
            Some(gates(self.gates))
        } else {
            None
        }
    }

    fn receive_midi(&mut self, msg: &MidiMessage<'_>) {
        match *msg {
            // running status devices send note off as a note on with zero velocity
            MidiMessage::NoteOn(channel, note, velocity) if channel == CHANNEL => {
                self.play(note, u8::from(velocity) > 0)
            }
            MidiMessage::NoteOff(channel, note, _) if channel == CHANNEL => self.play(note, false),
            _ => {}
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
    use wmidi::{Channel, U7};

    fn note_on(note: Note, velocity: u8) -> MidiMessage<'static> {
        MidiMessage::NoteOn(Channel::Ch1, note, U7::from_u8_lossy(velocity))
    }

    #[test]
    fn notes_open_and_close_gates() {
        let mut rng = ScriptedRng::new([0]);
        let mut notes = MidiNotes::default();
        assert_eq!(Some(gates([false; CHANNEL_COUNT])), notes.tick(input(0), &mut rng));
        assert_eq!(None, notes.tick(input(0), &mut rng), "Nothing changed");

        notes.receive_midi(&note_on(Note::D4, 100));
        notes.receive_midi(&note_on(Note::G4, 1));
        assert_eq!(
            Some(gates([false, false, true, false, false, false, false, true])),
            notes.tick(input(0), &mut rng),
            "Expected left but got right"
        );

        notes.receive_midi(&MidiMessage::NoteOff(
            Channel::Ch1,
            Note::D4,
            U7::from_u8_lossy(0),
        ));
        notes.receive_midi(&note_on(Note::G4, 0));
        assert_eq!(
            Some(gates([false; CHANNEL_COUNT])),
            notes.tick(input(0), &mut rng),
            "Expected left but got right"
        );
    }

    #[test]
    fn other_notes_are_ignored() {
        let mut rng = ScriptedRng::new([0]);
        let mut notes = MidiNotes::default();
        notes.tick(input(0), &mut rng);
        notes.receive_midi(&note_on(Note::C5, 100));
        assert_eq!(None, notes.tick(input(0), &mut rng));
    }

    #[test]
    fn other_channels_are_ignored() {
        let mut rng = ScriptedRng::new([0]);
        let mut notes = MidiNotes::default();
        notes.tick(input(0), &mut rng);
        notes.receive_midi(&MidiMessage::NoteOn(
            Channel::Ch2,
            Note::C4,
            U7::from_u8_lossy(100),
        ));
        assert_eq!(None, notes.tick(input(0), &mut rng), "Channel 2 should be ignored");

        notes.receive_midi(&note_on(Note::C4, 100));
        notes.tick(input(0), &mut rng);
        notes.receive_midi(&MidiMessage::NoteOff(
            Channel::Ch16,
            Note::C4,
            U7::from_u8_lossy(0),
        ));
        assert_eq!(
            None,
            notes.tick(input(0), &mut rng),
            "Note off on another channel should not close the gate"
        );
    }

    #[test]
    fn cv_is_sent_as_controller() {
        let mut rng = ScriptedRng::new([0]);
        let mut notes = MidiNotes::default();
        notes.tick(input(u16::MAX), &mut rng);
        assert!(
            matches!(
                notes.take_midi(),
                Some(MidiMessage::ControlChange(Channel::Ch1, _, value)) if u8::from(value) == 127
            ),
            "Expected a modulation wheel message"
        );
        assert_eq!(None, notes.take_midi(), "Message should only be handed over once");
    }
}
