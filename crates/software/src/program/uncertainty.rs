use super::{Behavior, Input};
use crate::{
    configuration::{Release, Thresholds},
    gate_detector::{Edge, GateDetector},
    output::{Frame, gates},
    pattern::Probability,
};
use rand::RngCore;

/// Each gate arriving at the CV input fires every output with its own probability.
#[derive(Debug, Clone)]
pub struct Uncertainty {
    detector: GateDetector,
    probability: Probability,
}

impl Uncertainty {
    /// Constructs an [`Uncertainty`].
    pub fn new(thresholds: Thresholds, probability: Probability) -> Self {
        Self {
            detector: GateDetector::new(thresholds),
            probability,
        }
    }
}

impl Behavior for Uncertainty {
    fn tick(&mut self, input: Input, rng: &mut dyn RngCore) -> Option<Frame> {
        match self.detector.detect(input.sample) {
            Some(Edge::Rising) => {
                let fired = self.probability.roll(rng);
                #[cfg(feature = "defmt")]
                defmt::debug!("Rising edge at {}, fired {}", input.sample, fired);
                Some(gates(fired))
            }
            Some(Edge::Falling) if self.probability.release() == Release::LightsOut => {
                Some(Frame::default())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{output::Level, pattern::test_rng::ScriptedRng, program::tests::input};

    fn uncertainty(release: Release) -> Uncertainty {
        Uncertainty::new(
            Thresholds::default(),
            Probability::new([100, 0, 100, 0, 100, 0, 100, 0], release).unwrap(),
        )
    }

    #[test]
    fn fires_on_rising_edge_only() {
        let mut rng = ScriptedRng::new([12345]);
        let mut uncertainty = uncertainty(Release::Hold);
        assert_eq!(None, uncertainty.tick(input(0), &mut rng));
        assert_eq!(
            Some(gates([true, false, true, false, true, false, true, false])),
            uncertainty.tick(input(60000), &mut rng),
            "Expected left but got right"
        );
        assert_eq!(
            None,
            uncertainty.tick(input(60000), &mut rng),
            "Sustained gate should not fire again"
        );
    }

    #[test]
    fn hold_ignores_falling_edge() {
        let mut rng = ScriptedRng::new([0]);
        let mut uncertainty = uncertainty(Release::Hold);
        uncertainty.tick(input(60000), &mut rng);
        assert_eq!(None, uncertainty.tick(input(0), &mut rng));
    }

    #[test]
    fn lights_out_on_falling_edge() {
        let mut rng = ScriptedRng::new([0]);
        let mut uncertainty = uncertainty(Release::LightsOut);
        uncertainty.tick(input(60000), &mut rng);
        assert_eq!(
            Some([Level::Gate(false); 8]),
            uncertainty.tick(input(0), &mut rng),
            "Expected left but got right"
        );
    }

    #[test]
    fn refires_after_gate_closes() {
        let mut rng = ScriptedRng::new([0]);
        let mut uncertainty = uncertainty(Release::Hold);
        assert!(uncertainty.tick(input(60000), &mut rng).is_some());
        uncertainty.tick(input(0), &mut rng);
        assert!(
            uncertainty.tick(input(60000), &mut rng).is_some(),
            "Second gate should fire"
        );
    }
}
