use num_derive::{FromPrimitive, ToPrimitive};

/// Determines what a random walk does when a step would carry it past either end of its range.
#[derive(Debug, Default, Clone, Copy, ToPrimitive, FromPrimitive, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoundaryPolicy {
    /// The walk stays where it is.
    #[default]
    Clip,
    /// The walk reappears at the opposite end.
    Wrap,
    /// The walk bounces, moving one step back inward instead.
    Reflect,
}

impl super::CycleConfig for BoundaryPolicy {}
