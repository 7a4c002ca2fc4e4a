use crate::{ConfigError, cv::CvSample};

/// The pair of levels which bound the hysteresis band of a [`GateDetector`][crate::gate_detector::GateDetector].
///
/// A gate opens above `high` and closes below `low`; readings in between never change it. This keeps noise near a
/// single crossing point from producing a burst of edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    low: CvSample,
    high: CvSample,
}

impl Thresholds {
    /// Constructs [`Thresholds`], rejecting a band with no width.
    pub fn new(low: u16, high: u16) -> Result<Self, ConfigError> {
        if low >= high {
            return Err(ConfigError::ThresholdOrder { low, high });
        }
        Ok(Self {
            low: CvSample::new(low),
            high: CvSample::new(high),
        })
    }

    /// Below this a gate closes.
    pub fn low(&self) -> CvSample {
        self.low
    }

    /// Above this a gate opens.
    pub fn high(&self) -> CvSample {
        self.high
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: CvSample::new(40000),
            high: CvSample::new(50000),
        }
    }
}
