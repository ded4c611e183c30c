//! Channel Physics for the QPSK transmit link
//!
//! Additive channel noise applied to modulated symbols: uniform or
//! Gaussian (Box-Muller), selected once per run.

pub mod channel;
pub mod noise;

pub use channel::NoiseChannel;
pub use noise::{derive_rng, GaussianNoise, NoiseKind, NoiseModel, NoiseSource, UniformNoise};
