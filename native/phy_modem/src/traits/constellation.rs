//! Constellation trait - Bits → symbol index → I/Q mapping
//!
//! Defines how groups of bits map to complex baseband points.
//! This trait knows nothing about noise, framing, or the wire.

/// Symbol alphabet mapping trait
///
/// Implementations define the geometry of the constellation diagram.
pub trait Constellation: Send + Sync {
    /// Number of points in the constellation (4 for QPSK)
    fn order(&self) -> usize;

    /// Bits per symbol (log2 of order)
    fn bits_per_symbol(&self) -> usize {
        (self.order() as f64).log2() as usize
    }

    /// Pack a group of `bits_per_symbol()` bits into a symbol index
    ///
    /// The first bit of the group is the most significant bit of the index.
    fn bits_to_symbol(&self, bits: &[u8]) -> u8 {
        debug_assert_eq!(bits.len(), self.bits_per_symbol());
        bits.iter().fold(0u8, |acc, &b| (acc << 1) | (b & 0x01))
    }

    /// Map a symbol index to I/Q coordinates
    ///
    /// # Arguments
    /// * `sym` - Symbol index (0 to order-1)
    ///
    /// # Returns
    /// Tuple of (I, Q) coordinates, normalized to the unit circle
    fn symbol_to_iq(&self, sym: u8) -> (f64, f64);
}
