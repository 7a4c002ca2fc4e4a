//! Provides [`Probability`], which decides each output independently with its own fixed chance of firing.

use crate::{
    ConfigError,
    configuration::Release,
    output::CHANNEL_COUNT,
};
use rand::{Rng, RngCore};

/// Chance, in percent, that each output fires on a rising edge, from the first output to the last.
pub const DEFAULT_WEIGHTS: [u8; CHANNEL_COUNT] = [100, 87, 75, 62, 50, 37, 25, 12];

/// A table of per-output firing probabilities.
///
/// Every output rolls its own die in `[0, 100)` and fires when the roll is below its weight, so a weight of 0 never
/// fires and a weight of 100 always does.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Probability {
    weights: [u8; CHANNEL_COUNT],
    release: Release,
}

impl Probability {
    /// Constructs a [`Probability`], rejecting weights above 100.
    pub fn new(weights: [u8; CHANNEL_COUNT], release: Release) -> Result<Self, ConfigError> {
        if let Some((channel, &weight)) = weights.iter().enumerate().find(|(_, w)| **w > 100) {
            return Err(ConfigError::ProbabilityOutOfRange { channel, weight });
        }
        Ok(Self { weights, release })
    }

    /// Constructs a [`Probability`] from a table whose length is only known at runtime.
    pub fn from_slice(weights: &[u8], release: Release) -> Result<Self, ConfigError> {
        let weights = weights
            .try_into()
            .map_err(|_| ConfigError::ChannelCount {
                expected: CHANNEL_COUNT,
                actual: weights.len(),
            })?;
        Self::new(weights, release)
    }

    /// Rolls for every output. Each output uses its own draw; no randomness is shared between them.
    pub fn roll<R: RngCore + ?Sized>(&self, rng: &mut R) -> [bool; CHANNEL_COUNT] {
        self.weights.map(|weight| fires(weight, rng))
    }

    /// What the outputs should do when the input falls.
    pub fn release(&self) -> Release {
        self.release
    }

    /// Getter.
    pub fn weights(&self) -> [u8; CHANNEL_COUNT] {
        self.weights
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            release: Release::default(),
        }
    }
}

fn fires<R: RngCore + ?Sized>(weight: u8, rng: &mut R) -> bool {
    rng.gen_range(0..100u8) < weight
}
