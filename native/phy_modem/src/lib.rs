//! PHY Modem - QPSK transmit chain
//!
//! This crate covers the PHY half of the transmit pipeline: random bits,
//! Gray-coded QPSK mapping, the fixed padded frame and the byte-level wire
//! encoding. Channel noise lives in `channel_physics`; sockets and config
//! live in `udp_link`. Every stage here is a pure transformation.

pub mod bits;
pub mod constellations;
pub mod error;
pub mod frame;
pub mod modem;
pub mod symbol;
pub mod traits;
pub mod wire;

// Re-export core types for convenience
pub use bits::{BitSequence, BitSource};
pub use constellations::Qpsk;
pub use error::{ModemError, Result};
pub use frame::{Frame, FrameLayout, BITS_PER_FRAME, PADDING_BLOCK, SYMBOLS_PER_FRAME};
pub use modem::Modulator;
pub use symbol::Symbol;
pub use traits::Constellation;
pub use wire::{deserialize, serialize, to_text, WireProfile};

/// QPSK modulator
pub type QpskModulator = Modulator<Qpsk>;
