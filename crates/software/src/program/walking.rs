use super::{Behavior, Input};
use crate::{
    configuration::Thresholds,
    gate_detector::{Edge, GateDetector},
    output::{Frame, levels},
    pattern::RandomWalks,
};
use rand::RngCore;

/// Each gate arriving at the CV input steps every output's random walk once.
#[derive(Debug, Clone)]
pub struct Walking {
    detector: GateDetector,
    walks: RandomWalks,
}

impl Walking {
    /// Constructs a [`Walking`].
    pub fn new(thresholds: Thresholds, walks: RandomWalks) -> Self {
        Self {
            detector: GateDetector::new(thresholds),
            walks,
        }
    }
}

impl Behavior for Walking {
    fn tick(&mut self, input: Input, rng: &mut dyn RngCore) -> Option<Frame> {
        // the falling edge only re-arms the detector
        match self.detector.detect(input.sample) {
            Some(Edge::Rising) => Some(levels(self.walks.step(rng))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        configuration::BoundaryPolicy, output::CHANNEL_COUNT, pattern::test_rng::ScriptedRng,
        program::tests::input,
    };

    #[test]
    fn steps_once_per_gate() {
        let mut rng = ScriptedRng::new([u32::MAX]);
        let walks = RandomWalks::new([4; CHANNEL_COUNT], BoundaryPolicy::Clip).unwrap();
        let mut walking = Walking::new(Thresholds::default(), walks);

        let mut last = None;
        for sample in [60000, 60000, 0, 60000, 0, 60000, 0, 60000, 0, 60000] {
            if let Some(frame) = walking.tick(input(sample), &mut rng) {
                last = Some(frame);
            }
        }
        // five gates, clipped at the top of the range on the fifth
        assert_eq!(Some(levels([u16::MAX; CHANNEL_COUNT])), last);
        assert_eq!([4; CHANNEL_COUNT], walking.walks.positions());
    }

    #[test]
    fn ignores_noise_inside_band() {
        let mut rng = ScriptedRng::new([u32::MAX]);
        let mut walking = Walking::new(Thresholds::default(), RandomWalks::default());
        walking.tick(input(60000), &mut rng);
        for sample in [45000, 49000, 41000, 48000] {
            assert_eq!(None, walking.tick(input(sample), &mut rng));
        }
        assert_eq!(
            [1; CHANNEL_COUNT],
            walking.walks.positions(),
            "Expected left but got right"
        );
    }
}
