//! Wire serializer
//!
//! Every f32 goes out as exactly 4 bytes, little-endian, independent of the
//! host's native byte order:
//!
//! ```text
//! ┌────────────┬────────────┬─────┬────────────┐
//! │ v0 (4B LE) │ v1 (4B LE) │ ... │ vN (4B LE) │
//! └────────────┴────────────┴─────┴────────────┘
//! ```
//!
//! `deserialize` is the bit-exact inverse, sign of zero and NaN payloads
//! included. The text form is for diagnostics only and is lossy.

use std::fmt::Write as _;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{ModemError, Result};
use crate::frame::{interleave, FrameLayout};
use crate::symbol::Symbol;

/// Bytes per encoded value
pub const BYTES_PER_VALUE: usize = 4;

/// Decimal places used by the text form
pub const TEXT_PRECISION: usize = 6;

/// Encode values as consecutive little-endian f32
pub fn serialize(values: &[f32]) -> Bytes {
    let mut dst = BytesMut::with_capacity(values.len() * BYTES_PER_VALUE);
    for &v in values {
        dst.put_f32_le(v);
    }
    dst.freeze()
}

/// Decode consecutive little-endian f32
pub fn deserialize(mut src: &[u8]) -> Result<Vec<f32>> {
    if src.len() % BYTES_PER_VALUE != 0 {
        return Err(ModemError::invalid(format!(
            "payload length {} is not a multiple of {}",
            src.len(),
            BYTES_PER_VALUE
        )));
    }
    let mut values = Vec::with_capacity(src.len() / BYTES_PER_VALUE);
    while src.has_remaining() {
        values.push(src.get_f32_le());
    }
    Ok(values)
}

/// Render symbols as `(r0,i0),(r1,i1),...`
pub fn to_text(symbols: &[Symbol]) -> String {
    let mut out = String::with_capacity(symbols.len() * 24);
    for (k, s) in symbols.iter().enumerate() {
        if k > 0 {
            out.push(',');
        }
        // Writing to a String cannot fail
        let _ = write!(out, "({:.p$},{:.p$})", s.i, s.q, p = TEXT_PRECISION);
    }
    out
}

/// Named wire format, one per deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireProfile {
    /// `3P` values in the zero/real/zero/imag/zero frame, `12P` bytes
    Padded(FrameLayout),
    /// `2S` interleaved values (real, imag, ...), `8S` bytes
    Compact,
    /// ASCII `(r,i)` pairs
    Text,
}

impl Default for WireProfile {
    fn default() -> Self {
        Self::Padded(FrameLayout::default())
    }
}

impl WireProfile {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Padded(_) => "padded",
            Self::Compact => "compact",
            Self::Text => "text",
        }
    }

    /// Expected payload size for `symbols` symbols, `None` for text
    pub fn payload_len(&self, symbols: usize) -> Option<usize> {
        match self {
            Self::Padded(layout) => Some(layout.frame_len() * BYTES_PER_VALUE),
            Self::Compact => Some(2 * symbols * BYTES_PER_VALUE),
            Self::Text => None,
        }
    }

    /// Produce the exact bytes handed to the transport
    pub fn encode(&self, symbols: &[Symbol]) -> Result<Bytes> {
        if symbols.is_empty() {
            return Err(ModemError::invalid("cannot encode an empty symbol sequence"));
        }
        let payload = match self {
            Self::Padded(layout) => serialize(layout.build(symbols)?.values()),
            Self::Compact => serialize(&interleave(symbols)),
            Self::Text => Bytes::from(to_text(symbols)),
        };
        tracing::trace!(profile = self.name(), len = payload.len(), "encoded payload");
        Ok(payload)
    }
}
