//! Turns the CV input into a gate by thresholding it with hysteresis, and reports each transition exactly once.

use crate::{configuration::Thresholds, cv::CvSample};

/// A transition of the gate derived from the CV input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// The input rose above the high threshold while the gate was closed.
    Rising,
    /// The input fell below the low threshold while the gate was open.
    Falling,
}

/// Tracks whether the CV input is currently considered high.
///
/// Only the edge-detecting methods ([`is_rising_edge`][Self::is_rising_edge], [`is_falling_edge`][Self::is_falling_edge]
/// and [`detect`][Self::detect]) change the stored gate. The level queries [`is_gate_on`][Self::is_gate_on] and
/// [`is_gate_off`][Self::is_gate_off] only look at the sample, so asking about the level can never swallow an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GateDetector {
    thresholds: Thresholds,
    current_gate: bool,
}

impl GateDetector {
    /// Constructs a [`GateDetector`] whose gate starts closed.
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            current_gate: false,
        }
    }

    /// Returns `true` exactly once per excursion of the input above the high threshold, opening the gate.
    pub fn is_rising_edge(&mut self, sample: CvSample) -> bool {
        if sample > self.thresholds.high() && !self.current_gate {
            self.current_gate = true;
            true
        } else {
            false
        }
    }

    /// Returns `true` exactly once per excursion of the input below the low threshold after the gate opened, closing
    /// the gate.
    pub fn is_falling_edge(&mut self, sample: CvSample) -> bool {
        if sample < self.thresholds.low() && self.current_gate {
            self.current_gate = false;
            true
        } else {
            false
        }
    }

    /// Checks a sample for either transition.
    ///
    /// Because the gate is either open or closed, at most one of the two checks can succeed, and the stored gate is
    /// updated at most once per sample.
    pub fn detect(&mut self, sample: CvSample) -> Option<Edge> {
        if self.is_rising_edge(sample) {
            Some(Edge::Rising)
        } else if self.is_falling_edge(sample) {
            Some(Edge::Falling)
        } else {
            None
        }
    }

    /// Whether the input is above the low threshold, regardless of the stored gate.
    pub fn is_gate_on(&self, sample: CvSample) -> bool {
        sample > self.thresholds.low()
    }

    /// Whether the input is below the low threshold, regardless of the stored gate.
    pub fn is_gate_off(&self, sample: CvSample) -> bool {
        sample < self.thresholds.low()
    }

    /// The stored gate, as of the last edge detected.
    pub fn gate(&self) -> bool {
        self.current_gate
    }

    /// The thresholds this detector was built with.
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}

impl Default for GateDetector {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> GateDetector {
        GateDetector::new(Thresholds::new(40000, 50000).unwrap())
    }

    fn s(value: u16) -> CvSample {
        CvSample::new(value)
    }

    #[test]
    fn rise_hold_fall() {
        let mut detector = detector();
        let edges = [0, 55000, 45000, 35000].map(|value| detector.detect(s(value)));
        assert_eq!(
            [None, Some(Edge::Rising), None, Some(Edge::Falling)],
            edges,
            "Expected left but got right"
        );
    }

    #[test]
    fn sustained_high_rises_once() {
        let mut detector = detector();
        assert!(detector.is_rising_edge(s(60000)), "Should rise");
        for _ in 0..100 {
            assert!(!detector.is_rising_edge(s(60000)), "Should not rise again");
        }
        assert!(detector.gate());
    }

    #[test]
    fn falls_once_after_rise() {
        let mut detector = detector();
        assert!(
            !detector.is_falling_edge(s(0)),
            "Should not fall before rising"
        );
        detector.is_rising_edge(s(60000));
        assert!(detector.is_falling_edge(s(1000)), "Should fall");
        assert!(!detector.is_falling_edge(s(1000)), "Should not fall again");
        assert!(!detector.gate());
    }

    #[test]
    fn hysteresis_band_is_silent() {
        let mut detector = detector();
        for value in [40001, 49999, 45000, 40001, 49999] {
            assert_eq!(None, detector.detect(s(value)), "Expected no edge");
        }

        detector.detect(s(50001));
        for value in [49999, 40001, 45000, 49999, 40001] {
            assert_eq!(None, detector.detect(s(value)), "Expected no edge");
        }
        assert!(detector.gate(), "Gate should still be open");
    }

    #[test]
    fn thresholds_are_exclusive() {
        let mut detector = detector();
        assert_eq!(None, detector.detect(s(50000)), "Equal to high is not above");
        detector.detect(s(50001));
        assert_eq!(None, detector.detect(s(40000)), "Equal to low is not below");
    }

    #[test]
    fn level_queries_leave_gate_alone() {
        let mut detector = detector();
        assert!(detector.is_gate_on(s(45000)));
        assert!(!detector.gate(), "Level query should not open the gate");
        assert!(
            detector.is_rising_edge(s(55000)),
            "Rising edge should not have been swallowed"
        );
        assert!(detector.is_gate_off(s(100)));
        assert!(detector.gate(), "Level query should not close the gate");
    }
}
