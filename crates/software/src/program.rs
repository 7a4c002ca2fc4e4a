//! The behaviors the module can run, one per [`Program`], unified behind the [`Behavior`] trait and dispatched
//! through [`Engine`].
//!
//! Every behavior is ticked once per iteration of the host's loop. The host owns the loop and its pacing; a behavior
//! only sees the inputs handed to it, so the same sample sequence always yields the same outputs for the same random
//! numbers.

mod clock;
pub use clock::*;

mod eye;
pub use eye::*;

mod gate_selector;
pub use gate_selector::*;

mod midi_cc;
pub use midi_cc::*;

mod midi_clock;
pub use midi_clock::*;

mod midi_notes;
pub use midi_notes::*;

mod uncertainty;
pub use uncertainty::*;

mod walking;
pub use walking::*;

use crate::{
    configuration::{OutputMode, Program, Thresholds},
    cv::CvSample,
    output::{Board, Frame},
    pattern::{Probability, RandomWalks},
};
use embassy_time::Instant;
use enum_dispatch::enum_dispatch;
use rand::RngCore;
use wmidi::MidiMessage;

/// What a behavior gets to look at on each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Input {
    /// The latest reading of the CV input.
    pub sample: CvSample,
    /// When the reading was taken.
    pub now: Instant,
}

/// A trait for anything that turns the module's inputs into output [`Frame`]s.
#[enum_dispatch(Engine)]
pub trait Behavior {
    /// Advances by one loop iteration. Returns the outputs to write, or `None` to leave them as they are.
    fn tick(&mut self, input: Input, rng: &mut dyn RngCore) -> Option<Frame>;

    /// Incorporates a received MIDI message into state. It takes effect on the next [`tick`][Self::tick].
    fn receive_midi(&mut self, _msg: &MidiMessage<'_>) {}

    /// Hands over a MIDI message produced during the last [`tick`][Self::tick], if any.
    fn take_midi(&mut self) -> Option<MidiMessage<'static>> {
        None
    }
}

/// One variant per [`Program`], each holding that program's state.
#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Engine {
    /// See [`Program::Uncertainty`].
    Uncertainty(Uncertainty),
    /// See [`Program::Walking`].
    Walking(Walking),
    /// See [`Program::GateSelector`].
    GateSelector(GateSelector),
    /// See [`Program::Clock`].
    Clock(Clock),
    /// See [`Program::Eye`].
    Eye(Eye),
    /// See [`Program::MidiNotes`].
    MidiNotes(MidiNotes),
    /// See [`Program::MidiCc`].
    MidiCc(MidiCc),
    /// See [`Program::MidiClock`].
    MidiClock(MidiClock),
}

/// Fixed parameters for the programs which need them.
///
/// Built once at startup; each time the [`Program`] changes, a fresh [`Engine`] is built from it, so patterns and
/// walks start over.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Hysteresis band for the programs which respond to gates at the CV input.
    pub thresholds: Thresholds,
    /// Per-output firing probabilities for [`Program::Uncertainty`].
    pub probability: Probability,
    /// Per-output walks, in their starting state, for [`Program::Walking`].
    pub walks: RandomWalks,
}

impl Engine {
    /// Constructs the [`Engine`] for a [`Program`].
    pub fn new(program: Program, config: &EngineConfig) -> Self {
        match program {
            Program::Uncertainty => Uncertainty::new(config.thresholds, config.probability).into(),
            Program::Walking => Walking::new(config.thresholds, config.walks).into(),
            Program::GateSelector => GateSelector::default().into(),
            Program::Clock => Clock::default().into(),
            Program::Eye => Eye::default().into(),
            Program::MidiNotes => MidiNotes::default().into(),
            Program::MidiCc => MidiCc::default().into(),
            Program::MidiClock => MidiClock::default().into(),
        }
    }

    /// The [`Program`] this engine runs.
    pub fn program(&self) -> Program {
        match self {
            Self::Uncertainty(_) => Program::Uncertainty,
            Self::Walking(_) => Program::Walking,
            Self::GateSelector(_) => Program::GateSelector,
            Self::Clock(_) => Program::Clock,
            Self::Eye(_) => Program::Eye,
            Self::MidiNotes(_) => Program::MidiNotes,
            Self::MidiCc(_) => Program::MidiCc,
            Self::MidiClock(_) => Program::MidiClock,
        }
    }

    /// How the outputs should be driven for this engine.
    pub fn output_mode(&self) -> OutputMode {
        self.program().output_mode()
    }

    /// Runs one iteration against a [`Board`]: samples the input, ticks, and writes the outputs if they changed.
    ///
    /// Returns `true` when a frame was written.
    pub fn step<B: Board + ?Sized>(
        &mut self,
        board: &mut B,
        now: Instant,
        rng: &mut dyn RngCore,
    ) -> bool {
        let sample = board.read_sample();
        match self.tick(Input { sample, now }, rng) {
            Some(frame) => {
                board.write_frame(&frame, self.output_mode());
                true
            }
            None => false,
        }
    }
}
