use crate::output::Level;

/// Determines how a [`Level`] is expressed on a physical output.
///
/// Fixed for the lifetime of a program; the firmware picks it from [`Program::output_mode`][super::Program::output_mode].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Outputs are either fully on or fully off.
    #[default]
    Digital,
    /// Outputs are driven with a duty cycle proportional to their level, approximating a continuous voltage once filtered.
    Pwm,
}

impl OutputMode {
    /// Returns whether a digital output should be on.
    ///
    /// Continuous levels count as on from half scale upward.
    pub fn is_high(&self, level: Level) -> bool {
        match level {
            Level::Gate(on) => on,
            Level::Cv(value) => value >= 0x8000,
        }
    }

    /// Returns the 16-bit duty cycle for an output, where `u16::MAX` is always on.
    ///
    /// In [`OutputMode::Digital`] only the extremes are produced.
    pub fn duty(&self, level: Level) -> u16 {
        match (self, level) {
            (Self::Pwm, Level::Cv(value)) => value,
            _ => {
                if self.is_high(level) {
                    u16::MAX
                } else {
                    0
                }
            }
        }
    }
}
