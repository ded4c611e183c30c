//! Fixed-layout padded frame
//!
//! Emulates a larger carrier frame with the payload at small known offsets.
//! With `S` symbols and a padding block of `P` values:
//!
//! ```text
//! ┌──────────┬──────────┬──────────────┬──────────┬──────────────┐
//! │ [0, P)   │ [P, P+S) │ [P+S, 2P)    │ [2P,2P+S)│ [2P+S, 3P)   │
//! │ zeros    │ real     │ zeros        │ imag     │ zeros        │
//! └──────────┴──────────┴──────────────┴──────────┴──────────────┘
//! ```
//!
//! Total length is `3P`. These offsets are part of the wire protocol.

use std::ops::Range;

use crate::error::{ModemError, Result};
use crate::symbol::Symbol;

/// Symbols carried per frame
pub const SYMBOLS_PER_FRAME: usize = 20;

/// Padding block size in f32 values
pub const PADDING_BLOCK: usize = 256;

/// Bits consumed per frame (2 per QPSK symbol)
pub const BITS_PER_FRAME: usize = 2 * SYMBOLS_PER_FRAME;

/// Validated frame geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    symbols: usize,
    padding: usize,
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            symbols: SYMBOLS_PER_FRAME,
            padding: PADDING_BLOCK,
        }
    }
}

impl FrameLayout {
    /// Create a layout for `symbols` symbols in `padding`-sized blocks
    ///
    /// Both must be positive and the symbols must fit inside one block.
    pub fn new(symbols: usize, padding: usize) -> Result<Self> {
        if symbols == 0 {
            return Err(ModemError::invalid("symbol count must be positive"));
        }
        if padding == 0 {
            return Err(ModemError::invalid("padding block size must be positive"));
        }
        if symbols > padding {
            return Err(ModemError::invalid(format!(
                "{} symbols do not fit in a padding block of {}",
                symbols, padding
            )));
        }
        Ok(Self { symbols, padding })
    }

    pub fn symbols(&self) -> usize {
        self.symbols
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Bits needed to fill one frame with QPSK symbols
    pub fn bits(&self) -> usize {
        2 * self.symbols
    }

    pub fn frame_len(&self) -> usize {
        3 * self.padding
    }

    /// Offsets of the real components
    pub fn real_range(&self) -> Range<usize> {
        self.padding..self.padding + self.symbols
    }

    /// Offsets of the imaginary components
    pub fn imag_range(&self) -> Range<usize> {
        2 * self.padding..2 * self.padding + self.symbols
    }

    /// Place `symbols` into a zero-padded frame
    ///
    /// The input must hold exactly `self.symbols()` symbols.
    pub fn build(&self, symbols: &[Symbol]) -> Result<Frame> {
        if symbols.len() != self.symbols {
            return Err(ModemError::invalid(format!(
                "frame expects {} symbols, got {}",
                self.symbols,
                symbols.len()
            )));
        }

        let mut values = vec![0.0f32; self.frame_len()];
        let real = self.real_range();
        let imag = self.imag_range();
        for (k, sym) in symbols.iter().enumerate() {
            values[real.start + k] = sym.i as f32;
            values[imag.start + k] = sym.q as f32;
        }

        Ok(Frame {
            layout: *self,
            values,
        })
    }
}

/// A built frame: `3P` f32 values in the padded layout
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    layout: FrameLayout,
    values: Vec<f32>,
}

impl Frame {
    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn real_parts(&self) -> &[f32] {
        &self.values[self.layout.real_range()]
    }

    pub fn imag_parts(&self) -> &[f32] {
        &self.values[self.layout.imag_range()]
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

/// Compact layout: r0, i0, r1, i1, ... with no padding
pub fn interleave(symbols: &[Symbol]) -> Vec<f32> {
    symbols
        .iter()
        .flat_map(|s| [s.i as f32, s.q as f32])
        .collect()
}
