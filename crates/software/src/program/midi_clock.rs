use super::{Behavior, Input};
use crate::{
    midi::CvToCc,
    output::{CHANNEL_COUNT, Frame, gates},
};
use rand::RngCore;
use wmidi::MidiMessage;

/// MIDI clock runs at 24 pulses per quarter note; the slowest output marks every fourth bar of 4/4.
pub const TICKS_PER_CYCLE: u16 = 384;

/// Outputs which stay high for a single tick after they fire.
const TRIGGERS: [usize; 2] = [START_TRIGGER, CLOCK_TRIGGER];
const START_TRIGGER: usize = 0;
const RUN_GATE: usize = 1;
const CLOCK_TRIGGER: usize = 2;

/// Divides incoming MIDI clock into triggers and gates, and sends the CV input out as a controller.
///
/// | Output | Meaning |
/// |--------|---------|
/// | 1      | Trigger on start |
/// | 2      | High from start until stop |
/// | 3      | Trigger on every clock pulse |
/// | 4      | Sixteenth notes |
/// | 5      | Eighth notes |
/// | 6      | Quarter notes |
/// | 7      | Whole notes |
/// | 8      | Every fourth bar |
#[derive(Debug, Clone)]
pub struct MidiClock {
    gates: [bool; CHANNEL_COUNT],
    ticks: u16,
    changed: bool,
    cv_to_cc: CvToCc,
    outgoing: Option<MidiMessage<'static>>,
}

impl Default for MidiClock {
    fn default() -> Self {
        Self {
            gates: [false; CHANNEL_COUNT],
            ticks: 0,
            changed: true,
            cv_to_cc: CvToCc::default(),
            outgoing: None,
        }
    }
}

impl MidiClock {
    fn pulse(&mut self) {
        let ticks = self.ticks;
        self.gates[CLOCK_TRIGGER] = true;
        self.gates[3] = ticks % 6 == 0;
        self.gates[4] = ticks % 12 == 0;
        self.gates[5] = ticks % 24 == 0;
        self.gates[6] = ticks % 96 == 0;
        self.gates[7] = ticks == 0;
        self.ticks = (ticks + 1) % TICKS_PER_CYCLE;
    }
}

impl Behavior for MidiClock {
    fn tick(&mut self, input: Input, _rng: &mut dyn RngCore) -> Option<Frame> {
        if let Some(msg) = self.cv_to_cc.convert(input.sample) {
            self.outgoing = Some(msg);
        }

        if !self.changed {
            return None;
        }
        let frame = gates(self.gates);

        // triggers written this tick are released on the next one
        self.changed = TRIGGERS.iter().any(|&trigger| self.gates[trigger]);
        for trigger in TRIGGERS {
            self.gates[trigger] = false;
        }
        Some(frame)
    }

    fn receive_midi(&mut self, msg: &MidiMessage<'_>) {
        match msg {
            MidiMessage::TimingClock => self.pulse(),
            MidiMessage::Start => {
                self.gates[START_TRIGGER] = true;
                self.gates[RUN_GATE] = true;
            }
            MidiMessage::Stop => self.gates = [false; CHANNEL_COUNT],
            _ => return,
        }
        self.changed = true;
    }

    fn take_midi(&mut self) -> Option<MidiMessage<'static>> {
        self.outgoing.take()
    }
}
