use super::{Behavior, Input};
use crate::output::{CHANNEL_COUNT, Frame, levels};
use embassy_time::{Duration, Instant};
use rand::RngCore;

/// Time the light takes to travel from the first output to the last.
pub const SWEEP: Duration = Duration::from_secs(10);

/// A light that sweeps back and forth across the outputs, brightest at its current position and fading with distance.
///
/// Position is kept in microseconds of travel rather than as a fraction, so that the short gaps between ticks still
/// add up.
#[derive(Debug, Clone)]
pub struct Eye {
    position: u64,
    rising: bool,
    last_tick: Option<Instant>,
}

impl Default for Eye {
    fn default() -> Self {
        Self {
            position: 0,
            rising: true,
            last_tick: None,
        }
    }
}

impl Eye {
    fn advance(&mut self, elapsed: Duration) {
        let sweep = SWEEP.as_micros();
        let distance = elapsed.as_micros();
        self.position = if self.rising {
            self.position.saturating_add(distance).min(sweep)
        } else {
            self.position.saturating_sub(distance)
        };

        if self.position == sweep {
            self.rising = false;
        }
        if self.position == 0 {
            self.rising = true;
        }
    }

    /// Brightness of every output for the light's current position.
    pub fn levels(&self) -> [u16; CHANNEL_COUNT] {
        let full = u64::from(u16::MAX);
        let position = self.position * full / SWEEP.as_micros();
        core::array::from_fn(|n| {
            let center = n as u64 * full / (CHANNEL_COUNT as u64 - 1);
            (full - position.abs_diff(center)) as u16
        })
    }
}

impl Behavior for Eye {
    fn tick(&mut self, input: Input, _rng: &mut dyn RngCore) -> Option<Frame> {
        if let Some(last_tick) = self.last_tick {
            self.advance(input.now.saturating_duration_since(last_tick));
        }
        self.last_tick = Some(input.now);
        Some(levels(self.levels()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cv::CvSample, pattern::test_rng::ScriptedRng};

    fn at(millis: u64) -> Input {
        Input {
            sample: CvSample::default(),
            now: Instant::from_millis(millis),
        }
    }

    #[test]
    fn starts_on_first_output() {
        let eye = Eye::default();
        let levels = eye.levels();
        assert_eq!(u16::MAX, levels[0], "Expected left but got right");
        assert_eq!(0, levels[7], "Expected left but got right");
    }

    #[test]
    fn sweeps_and_returns() {
        let mut rng = ScriptedRng::new([0]);
        let mut eye = Eye::default();
        eye.tick(at(0), &mut rng);

        let frame = eye.tick(at(10_000), &mut rng).unwrap();
        assert_eq!(levels([0, 9362, 18724, 28086, 37448, 46810, 56172, 65535]), frame);
        assert_eq!(SWEEP.as_micros(), eye.position, "Should stop at the last output");
        assert!(!eye.rising, "Should turn around at the end");

        eye.tick(at(12_000), &mut rng);
        assert_eq!(8_000_000, eye.position, "Should be heading back");
        eye.tick(at(27_000), &mut rng);
        assert_eq!(0, eye.position);
        assert!(eye.rising, "Should turn around at the start");
    }

    #[test]
    fn overshoot_clamps_to_the_end() {
        let mut rng = ScriptedRng::new([0]);
        let mut eye = Eye::default();
        eye.tick(at(0), &mut rng);
        eye.tick(at(13_000), &mut rng);
        assert_eq!(
            SWEEP.as_micros(),
            eye.position,
            "A long gap should not carry past the last output"
        );
        assert!(!eye.rising);
    }

    #[test]
    fn small_steps_accumulate() {
        let mut rng = ScriptedRng::new([0]);
        let mut eye = Eye::default();
        for tick in 0..=1000 {
            eye.tick(
                Input {
                    sample: CvSample::default(),
                    now: Instant::from_micros(tick * 100),
                },
                &mut rng,
            );
        }
        assert_eq!(100_000, eye.position, "Expected left but got right");
    }

    #[test]
    fn midpoint_lights_middle_outputs_equally() {
        let eye = Eye {
            position: SWEEP.as_micros() / 2,
            rising: true,
            last_tick: None,
        };
        let levels = eye.levels();
        assert_eq!(levels[3], levels[4], "Expected left but got right");
        assert!(
            levels[0].abs_diff(levels[7]) <= 1,
            "Outer outputs should be equally dim"
        );
    }
}
