//! This crate contains architecture-agnostic logic for Uncertainty, a [Eurorack](https://en.wikipedia.org/wiki/Eurorack)
//! module with a single [CV](https://en.wikipedia.org/wiki/CV/gate) input and eight gate/CV outputs. The input is sampled,
//! interpreted by the active [`Program`][`configuration::Program`], and turned into an eight channel
//! [`Frame`][`output::Frame`] of output levels.
//!
//! Nothing in here touches hardware: samples come in through the [`Board`][`output::Board`] trait, randomness through
//! [`rand::RngCore`], and time as an [`embassy_time::Instant`] supplied by the caller. This keeps every behavior a pure
//! function of (previous state, new input) and testable on the host.

#![deny(missing_docs)]
#![no_std]

pub mod configuration;

pub mod cv;

mod error;
pub use error::*;

pub mod gate_detector;

/// Conversion between USB-MIDI event packets and [`wmidi`] messages, and CV-to-MIDI translation.
pub mod midi;

pub mod output;

pub mod pattern;

pub mod program;
