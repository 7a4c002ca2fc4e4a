//! Provides [`Walk`], a one-dimensional random walk over a bounded range, and [`RandomWalks`], one walk per output.

use crate::{ConfigError, configuration::BoundaryPolicy, output::CHANNEL_COUNT};
use core::num::NonZeroU16;
use rand::RngCore;

/// Range of each output's walk, from the first output to the last.
///
/// Short walks move in big, obvious steps; long ones drift slowly across the whole output range.
pub const DEFAULT_RANGES: [u16; CHANNEL_COUNT] = [2, 4, 7, 11, 15, 31, 63, 127];

/// The outcome of a coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards the top of the range.
    Up,
    /// Towards zero.
    Down,
}

impl Direction {
    /// Flips a fair coin.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        if rng.next_u32() >> 31 == 1 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

/// A position which moves one step up or down at a time within `[0, range]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Walk {
    range: u16,
    position: u16,
    policy: BoundaryPolicy,
}

impl Walk {
    /// Constructs a [`Walk`] starting at zero.
    pub fn new(range: NonZeroU16, policy: BoundaryPolicy) -> Self {
        Self {
            range: range.get(),
            position: 0,
            policy,
        }
    }

    /// Moves one step and returns the new position. Steps past either end are handled according to the walk's
    /// [`BoundaryPolicy`].
    pub fn step(&mut self, direction: Direction) -> u16 {
        self.position = match (direction, self.policy) {
            (Direction::Up, _) if self.position < self.range => self.position + 1,
            (Direction::Down, _) if self.position > 0 => self.position - 1,
            (_, BoundaryPolicy::Clip) => self.position,
            (Direction::Up, BoundaryPolicy::Wrap) => 0,
            (Direction::Down, BoundaryPolicy::Wrap) => self.range,
            (Direction::Up, BoundaryPolicy::Reflect) => self.range - 1,
            (Direction::Down, BoundaryPolicy::Reflect) => 1,
        };
        self.position
    }

    /// Getter.
    pub fn position(&self) -> u16 {
        self.position
    }

    /// Getter.
    pub fn range(&self) -> u16 {
        self.range
    }

    /// The position scaled to the full output range: zero is 0 and the top of the range is `u16::MAX`.
    pub fn level(&self) -> u16 {
        (u32::from(self.position) * u32::from(u16::MAX) / u32::from(self.range)) as u16
    }
}

/// One independent [`Walk`] per output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RandomWalks {
    walks: [Walk; CHANNEL_COUNT],
}

impl RandomWalks {
    /// Constructs a walk for each range, rejecting ranges of zero.
    pub fn new(
        ranges: [u16; CHANNEL_COUNT],
        policy: BoundaryPolicy,
    ) -> Result<Self, ConfigError> {
        let mut walks = [Walk::new(NonZeroU16::MIN, policy); CHANNEL_COUNT];
        for (channel, (walk, range)) in walks.iter_mut().zip(ranges).enumerate() {
            let range = NonZeroU16::new(range).ok_or(ConfigError::EmptyWalkRange { channel })?;
            *walk = Walk::new(range, policy);
        }
        Ok(Self { walks })
    }

    /// Constructs walks from a table whose length is only known at runtime.
    pub fn from_slice(ranges: &[u16], policy: BoundaryPolicy) -> Result<Self, ConfigError> {
        let ranges = ranges
            .try_into()
            .map_err(|_| ConfigError::ChannelCount {
                expected: CHANNEL_COUNT,
                actual: ranges.len(),
            })?;
        Self::new(ranges, policy)
    }

    /// Flips a separate coin for every walk, steps each one, and returns their scaled levels.
    pub fn step<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> [u16; CHANNEL_COUNT] {
        for walk in self.walks.iter_mut() {
            walk.step(Direction::random(rng));
        }
        self.levels()
    }

    /// The current level of every walk.
    pub fn levels(&self) -> [u16; CHANNEL_COUNT] {
        self.walks.map(|walk| walk.level())
    }

    /// The current position of every walk.
    pub fn positions(&self) -> [u16; CHANNEL_COUNT] {
        self.walks.map(|walk| walk.position())
    }
}

impl Default for RandomWalks {
    fn default() -> Self {
        let policy = BoundaryPolicy::default();
        Self {
            walks: DEFAULT_RANGES.map(|range| {
                Walk::new(NonZeroU16::new(range).unwrap_or(NonZeroU16::MIN), policy)
            }),
        }
    }
}
