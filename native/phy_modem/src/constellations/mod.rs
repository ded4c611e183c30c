//! Constellation implementations
//!
//! - QPSK (2 bits/symbol)

mod qpsk;

pub use qpsk::Qpsk;
