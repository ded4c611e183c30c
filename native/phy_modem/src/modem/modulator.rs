//! Generic Modulator
//!
//! Composes a Constellation into a bit → symbol mapper. No runtime
//! branching on modulation type; QPSK is `Modulator<Qpsk>`.

use crate::error::{ModemError, Result};
use crate::symbol::Symbol;
use crate::traits::Constellation;

/// Generic modulator over a constellation
///
/// # Type Parameters
/// * `C` - Constellation (bits → I/Q mapping)
#[derive(Debug, Clone, Default)]
pub struct Modulator<C: Constellation> {
    constellation: C,
}

impl<C: Constellation> Modulator<C> {
    pub fn new(constellation: C) -> Self {
        Self { constellation }
    }

    pub fn constellation(&self) -> &C {
        &self.constellation
    }

    /// Modulate bits to symbols
    ///
    /// Bits are consumed in groups of `bits_per_symbol()` in sequence order.
    /// A length that is not a whole number of groups, or any value other
    /// than 0/1, is rejected; input is never truncated.
    pub fn modulate(&self, bits: &[u8]) -> Result<Vec<Symbol>> {
        let k = self.constellation.bits_per_symbol();
        if bits.is_empty() || bits.len() % k != 0 {
            return Err(ModemError::invalid(format!(
                "bit length {} is not a positive multiple of {}",
                bits.len(),
                k
            )));
        }
        if let Some(pos) = bits.iter().position(|&b| b > 1) {
            return Err(ModemError::invalid(format!(
                "bit {} has value {}, expected 0 or 1",
                pos, bits[pos]
            )));
        }

        let symbols: Vec<Symbol> = bits
            .chunks_exact(k)
            .map(|group| {
                let sym = self.constellation.bits_to_symbol(group);
                Symbol::from(self.constellation.symbol_to_iq(sym))
            })
            .collect();

        tracing::trace!(count = symbols.len(), "modulated symbols");
        Ok(symbols)
    }
}
