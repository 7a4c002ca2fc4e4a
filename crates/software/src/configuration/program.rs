use super::OutputMode;
use num_derive::{FromPrimitive, ToPrimitive};

/// Selects what the module does with its CV input and outputs.
///
/// The order of the variants is the order in which the pushbutton steps through them, and the status LED blinks
/// one more time than the variant's index.
#[derive(Debug, Default, Clone, Copy, ToPrimitive, FromPrimitive, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Program {
    /// Each rising edge at the CV input rolls the dice for every output; an output goes high with its own fixed probability.
    #[default]
    Uncertainty,
    /// Each rising edge moves eight independent random walks one step; outputs are stepped voltages.
    Walking,
    /// The CV input picks which single output is high.
    GateSelector,
    /// A free-running clock whose tempo follows the CV input; each output divides the one before it by two.
    Clock,
    /// A light sweeps back and forth across the outputs.
    Eye,
    /// MIDI notes 60 to 67 play gates; the CV input is sent out as the modulation wheel.
    MidiNotes,
    /// MIDI controllers 0 to 7 set output voltages; the CV input is sent out as the modulation wheel.
    MidiCc,
    /// MIDI clock is divided into triggers and gates; the CV input is sent out as the modulation wheel.
    MidiClock,
}

impl super::CycleConfig for Program {}

impl Program {
    /// How the outputs should be driven while this program is active.
    pub fn output_mode(&self) -> OutputMode {
        match self {
            Self::Uncertainty
            | Self::GateSelector
            | Self::Clock
            | Self::MidiNotes
            | Self::MidiClock => OutputMode::Digital,
            Self::Walking | Self::Eye | Self::MidiCc => OutputMode::Pwm,
        }
    }

    /// Returns `true` for the programs which listen to MIDI.
    pub fn uses_midi(&self) -> bool {
        matches!(self, Self::MidiNotes | Self::MidiCc | Self::MidiClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_is_continuous() {
        assert_eq!(OutputMode::Pwm, Program::Walking.output_mode());
        assert_eq!(OutputMode::Digital, Program::Uncertainty.output_mode());
    }

    #[test]
    fn uses_midi() {
        assert!(Program::MidiCc.uses_midi(), "Should listen to MIDI");
        assert!(!Program::Eye.uses_midi(), "Should not listen to MIDI");
    }
}
