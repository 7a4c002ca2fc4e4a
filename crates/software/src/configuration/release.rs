/// Determines what happens to the outputs of a gate pattern when the CV input falls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Release {
    /// Outputs keep their pattern until the next rising edge replaces it.
    #[default]
    Hold,
    /// Every output goes low on the falling edge, so outputs follow the length of the incoming gate.
    LightsOut,
}
