//! Core modem implementations
//!
//! Generic Modulator that composes a Constellation for compile-time
//! specialization.

mod modulator;

pub use modulator::Modulator;
