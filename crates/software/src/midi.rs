mod cv_to_cc;
pub use cv_to_cc::*;

mod packet;
pub use packet::*;

use wmidi::Channel;

/// The MIDI channel the module listens on and sends on.
pub const CHANNEL: Channel = Channel::Ch1;
