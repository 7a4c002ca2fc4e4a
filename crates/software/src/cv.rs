//! Provides [`CvSample`], the normalized reading of the module's control voltage input.

/// A reading of the CV input, normalized to 16 bits regardless of the resolution of the converter that produced it.
///
/// 0 is the bottom of the input range and [`CvSample::MAX`] the top. With a bipolar input stage, [`CvSample::CENTER`]
/// corresponds to 0 V.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CvSample(u16);

impl CvSample {
    /// Highest possible reading.
    pub const MAX: Self = Self(u16::MAX);
    /// Midpoint of the input range.
    pub const CENTER: Self = Self(32768);

    /// Wraps a reading that is already 16 bits wide.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Scales a raw reading from an ADC with `bits` of resolution up to 16 bits.
    ///
    /// Readings beyond the converter's range are clamped to its full scale rather than rejected.
    pub fn from_adc(raw: u16, bits: u8) -> Self {
        let bits = bits.clamp(1, 16);
        let full_scale = u16::MAX >> (16 - bits);
        let raw = raw.min(full_scale);
        // left-justify, then replicate the top bits into the vacated ones so full scale maps to u16::MAX
        let shift = 16 - u32::from(bits);
        let mut value = u32::from(raw) << shift;
        let mut fill = shift;
        while fill > 0 {
            value |= value >> u32::from(bits);
            fill = fill.saturating_sub(u32::from(bits));
        }
        Self(value as u16)
    }

    /// The reading as a plain integer.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Distance from [`CvSample::CENTER`], i.e. the magnitude of a bipolar voltage regardless of its sign.
    pub const fn bipolar_magnitude(self) -> u16 {
        self.0.abs_diff(Self::CENTER.0)
    }
}

impl From<u16> for CvSample {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<CvSample> for u16 {
    fn from(sample: CvSample) -> Self {
        sample.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_bit_full_scale() {
        assert_eq!(
            CvSample::MAX,
            CvSample::from_adc(4095, 12),
            "Expected left but got right"
        );
        assert_eq!(
            CvSample::new(0),
            CvSample::from_adc(0, 12),
            "Expected left but got right"
        );
    }

    #[test]
    fn twelve_bit_midscale() {
        assert_eq!(
            0x8008,
            CvSample::from_adc(2048, 12).value(),
            "Expected left but got right"
        );
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(
            CvSample::MAX,
            CvSample::from_adc(5000, 12),
            "Readings above full scale should clamp"
        );
    }

    #[test]
    fn sixteen_bit_is_unchanged() {
        assert_eq!(
            CvSample::new(12345),
            CvSample::from_adc(12345, 16),
            "Expected left but got right"
        );
    }

    #[test]
    fn bipolar_magnitude() {
        assert_eq!(0, CvSample::CENTER.bipolar_magnitude());
        assert_eq!(32768, CvSample::new(0).bipolar_magnitude());
        assert_eq!(32767, CvSample::MAX.bipolar_magnitude());
    }
}
