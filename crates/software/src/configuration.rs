//! This module contains both user-configurable settings (implemented as enums) and traits to make them easier to work with in code.

mod boundary_policy;
pub use boundary_policy::*;

mod output_mode;
pub use output_mode::*;

mod program;
pub use program::*;

mod release;
pub use release::*;

mod thresholds;
pub use thresholds::*;

use num_traits::{FromPrimitive, ToPrimitive};

/// A trait which allows infinite cycling of an enum's variants.
///
/// Useful for pushbutton user interfaces, allowing presses to advance from the current to the next variant,
/// cycling back to the beginning when all variants have been exhausted.
pub trait CycleConfig {
    /// Return the next variant, cycling back to the beginning as needed.
    fn cycle(self) -> Self
    where
        Self: FromPrimitive + ToPrimitive + Sized,
    {
        let index = self
            .to_u8()
            .expect("enum variants should be castable to u8");
        match <Self as FromPrimitive>::from_u8(index + 1) {
            Some(new_selection) => new_selection,
            None => FromPrimitive::from_u8(0).expect("enum should not be empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle() {
        let config = Program::Uncertainty.cycle();
        assert_eq!(
            Program::Walking,
            config,
            "Should advance to next variant; expected left but got right"
        );

        let config = Program::MidiClock.cycle();
        assert_eq!(
            Program::Uncertainty,
            config,
            "Should wrap around to first variant; expected left but got right"
        );
    }

    #[test]
    fn cycle_visits_every_variant() {
        let mut config = BoundaryPolicy::Clip;
        let mut visited = 0;
        loop {
            config = config.cycle();
            visited += 1;
            if config == BoundaryPolicy::Clip {
                break;
            }
        }
        assert_eq!(3, visited, "Expected left but got right");
    }
}
