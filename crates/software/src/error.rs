use thiserror::Error;

/// Reasons a configuration is rejected at construction time.
///
/// None of these can happen while the module is running; they describe tables and thresholds that were wrong from the
/// start, so the firmware treats them as fatal.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The low threshold must sit strictly below the high threshold, or there is no hysteresis band.
    #[error("low threshold {low} must be below high threshold {high}")]
    ThresholdOrder {
        /// Offending low threshold.
        low: u16,
        /// Offending high threshold.
        high: u16,
    },
    /// A per-channel table did not have exactly one entry per output.
    #[error("expected {expected} channel entries, got {actual}")]
    ChannelCount {
        /// Number of outputs on the module.
        expected: usize,
        /// Length of the table that was supplied.
        actual: usize,
    },
    /// Probability weights are percentages.
    #[error("channel {channel} probability {weight} exceeds 100")]
    ProbabilityOutOfRange {
        /// Index of the offending channel.
        channel: usize,
        /// Offending weight.
        weight: u8,
    },
    /// A walk needs at least two positions to go anywhere.
    #[error("channel {channel} walk range must be positive")]
    EmptyWalkRange {
        /// Index of the offending channel.
        channel: usize,
    },
}
