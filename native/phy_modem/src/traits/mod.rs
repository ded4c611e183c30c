//! Core DSP traits for the PHY engine
//!
//! These traits define mathematical behavior, not transports or framing.

mod constellation;

pub use constellation::Constellation;
