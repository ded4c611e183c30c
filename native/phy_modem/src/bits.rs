//! Random bit source
//!
//! Produces fixed-length sequences of independent, uniformly distributed
//! bits. The generator is always injected so a seed reproduces the exact
//! sequence; wall-clock seeding belongs to the caller.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{ModemError, Result};

/// Ordered sequence of bits, each 0 or 1, with an even length of at least 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    /// Build a sequence from known bits.
    ///
    /// Rejects odd or too-short lengths and any value other than 0 or 1.
    pub fn from_bits(bits: Vec<u8>) -> Result<Self> {
        check_count(bits.len())?;
        if let Some(pos) = bits.iter().position(|&b| b > 1) {
            return Err(ModemError::invalid(format!(
                "bit {} has value {}, expected 0 or 1",
                pos, bits[pos]
            )));
        }
        Ok(Self { bits })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bits
    }
}

impl AsRef<[u8]> for BitSequence {
    fn as_ref(&self) -> &[u8] {
        &self.bits
    }
}

fn check_count(count: usize) -> Result<()> {
    if count < 2 {
        return Err(ModemError::invalid(format!(
            "bit count must be at least 2, got {}",
            count
        )));
    }
    if count % 2 != 0 {
        return Err(ModemError::invalid(format!(
            "bit count must be even, got {}",
            count
        )));
    }
    Ok(())
}

/// Random bit generator backed by an injected RNG
pub struct BitSource<R: Rng> {
    rng: R,
}

impl BitSource<ChaCha8Rng> {
    /// Reproducible source seeded from a single `u64`
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> BitSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw `count` independent bits.
    ///
    /// `count` is validated before the generator is touched, so a rejected
    /// call leaves the source in the same state.
    pub fn generate(&mut self, count: usize) -> Result<BitSequence> {
        check_count(count)?;
        let bits: Vec<u8> = (0..count).map(|_| self.rng.gen_range(0..=1u8)).collect();
        tracing::trace!(count, ?bits, "generated bits");
        Ok(BitSequence { bits })
    }
}
