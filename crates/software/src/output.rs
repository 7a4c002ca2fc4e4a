//! Types describing what the module's eight outputs should do, and the [`Board`] trait through which they are driven.

use crate::{configuration::OutputMode, cv::CvSample};

/// Number of outputs on the module.
pub const CHANNEL_COUNT: usize = 8;

/// The value a program asks an output to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// On or off.
    Gate(bool),
    /// A continuous level where `u16::MAX` is full scale.
    Cv(u16),
}

impl Default for Level {
    fn default() -> Self {
        Self::Gate(false)
    }
}

/// One value per output, in output order.
pub type Frame = [Level; CHANNEL_COUNT];

/// Builds a [`Frame`] of gates.
pub fn gates(values: [bool; CHANNEL_COUNT]) -> Frame {
    values.map(Level::Gate)
}

/// Builds a [`Frame`] of continuous levels.
pub fn levels(values: [u16; CHANNEL_COUNT]) -> Frame {
    values.map(Level::Cv)
}

/// The hardware seen by a program: one CV input and [`CHANNEL_COUNT`] outputs.
///
/// Each target implements this over its own ADC and output peripherals, so the logic in this crate never holds
/// pin or converter handles itself.
pub trait Board {
    /// Takes a fresh reading of the CV input.
    fn read_sample(&mut self) -> CvSample;

    /// Drives output `index` to `level`, expressed according to `mode`.
    fn write_output(&mut self, index: usize, level: Level, mode: OutputMode);

    /// Writes every output of a [`Frame`] in order.
    fn write_frame(&mut self, frame: &Frame, mode: OutputMode) {
        for (index, level) in frame.iter().enumerate() {
            self.write_output(index, *level, mode);
        }
    }

    /// Turns every output off.
    fn lights_out(&mut self, mode: OutputMode) {
        self.write_frame(&Frame::default(), mode);
    }
}
