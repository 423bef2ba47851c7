//! # Primitive Codec Table
//!
//! One entry per [`PrimKind`]: a fixed width plus an encode-one-value and a
//! decode-one-value step, parameterized by the record's byte-order mode.
//!
//! ## Contracts
//!
//! - Integer bounds are enforced before any byte is written; out-of-range
//!   input raises `IntegerRange`.
//! - Bool encodes `false → 0x00`, `true → 0x01`; any nonzero byte decodes
//!   to `true`.
//! - Char is exactly one byte in the record's string encoding; a character
//!   that does not fit raises `CharEncoding`.
//! - Floats use the platform IEEE-754 binary32/binary64 representation,
//!   byte-swapped as the mode dictates.
//! - `encode` writes exactly `kind.width()` bytes into `out`; `decode`
//!   reads exactly that many. Callers slice accordingly.
//!
//! All functions are pure and allocation-free, in the same shape as the
//! varint codec this layer replaced: explicit byte movement on slices,
//! no trait machinery.

use eyre::{ensure, Result};

use crate::encoding::strings::Encoding;
use crate::encoding::ByteOrder;
use crate::error::{codec_bail, CodecErrorKind};
use crate::types::{PrimKind, Value};

/// Writes the low `width` bytes of `bits` into `out` in the given order.
fn write_bits(out: &mut [u8], bits: u64, width: usize, order: ByteOrder) {
    let le = bits.to_le_bytes();
    if order.is_little() {
        out[..width].copy_from_slice(&le[..width]);
    } else {
        for i in 0..width {
            out[i] = le[width - 1 - i];
        }
    }
}

/// Reads `width` bytes from `bytes` into the low bits of a u64.
fn read_bits(bytes: &[u8], width: usize, order: ByteOrder) -> u64 {
    let mut bits: u64 = 0;
    if order.is_little() {
        for i in (0..width).rev() {
            bits = (bits << 8) | bytes[i] as u64;
        }
    } else {
        for &b in &bytes[..width] {
            bits = (bits << 8) | b as u64;
        }
    }
    bits
}

fn int_in_range(kind: PrimKind, value: &Value) -> Result<i128> {
    let wide = match value.as_int_wide() {
        Some(wide) => wide,
        None => codec_bail!(
            CodecErrorKind::IntegerRange,
            "expected an integer for {}, got {}",
            kind.name(),
            value.kind_name()
        ),
    };
    let (min, max) = kind.bounds().expect("integer kind has bounds");
    if wide < min || wide > max {
        codec_bail!(
            CodecErrorKind::IntegerRange,
            "value {} out of range for {} ({}..={})",
            wide,
            kind.name(),
            min,
            max
        );
    }
    Ok(wide)
}

/// Encodes one primitive value into `out`, which must be exactly
/// `kind.width()` bytes.
pub fn encode(
    kind: PrimKind,
    value: &Value,
    order: ByteOrder,
    encoding: Encoding,
    out: &mut [u8],
) -> Result<()> {
    debug_assert_eq!(out.len(), kind.width());
    match kind {
        PrimKind::U8 | PrimKind::U16 | PrimKind::U32 | PrimKind::U64 => {
            let wide = int_in_range(kind, value)?;
            write_bits(out, wide as u64, kind.width(), order);
        }
        PrimKind::I8 | PrimKind::I16 | PrimKind::I32 | PrimKind::I64 => {
            let wide = int_in_range(kind, value)?;
            // two's complement truncated to width
            write_bits(out, wide as i64 as u64, kind.width(), order);
        }
        PrimKind::F32 => {
            let v = match value.as_f64() {
                Some(v) => v,
                None => codec_bail!(
                    CodecErrorKind::IntegerRange,
                    "expected a number for float32, got {}",
                    value.kind_name()
                ),
            };
            write_bits(out, (v as f32).to_bits() as u64, 4, order);
        }
        PrimKind::F64 => {
            let v = match value.as_f64() {
                Some(v) => v,
                None => codec_bail!(
                    CodecErrorKind::IntegerRange,
                    "expected a number for float64, got {}",
                    value.kind_name()
                ),
            };
            write_bits(out, v.to_bits(), 8, order);
        }
        PrimKind::Bool => {
            let v = match value {
                Value::Bool(b) => *b,
                other => codec_bail!(
                    CodecErrorKind::IntegerRange,
                    "expected a bool, got {}",
                    other.kind_name()
                ),
            };
            out[0] = if v { 0x01 } else { 0x00 };
        }
        PrimKind::Char => {
            let c = match value {
                Value::Char(c) => *c,
                other => codec_bail!(
                    CodecErrorKind::CharEncoding,
                    "expected a char, got {}",
                    other.kind_name()
                ),
            };
            out[0] = encoding.encode_char(c)?;
        }
    }
    Ok(())
}

/// Decodes one primitive value from `bytes`, which must be exactly
/// `kind.width()` bytes.
pub fn decode(kind: PrimKind, bytes: &[u8], order: ByteOrder, encoding: Encoding) -> Result<Value> {
    ensure!(
        bytes.len() == kind.width(),
        "{} expects {} bytes, got {}",
        kind.name(),
        kind.width(),
        bytes.len()
    );
    let value = match kind {
        PrimKind::U8 | PrimKind::U16 | PrimKind::U32 | PrimKind::U64 => {
            Value::UInt(read_bits(bytes, kind.width(), order))
        }
        PrimKind::I8 | PrimKind::I16 | PrimKind::I32 | PrimKind::I64 => {
            let bits = read_bits(bytes, kind.width(), order);
            let shift = 64 - kind.width() * 8;
            // shift up then arithmetic-shift down to sign-extend
            Value::Int(((bits << shift) as i64) >> shift)
        }
        PrimKind::F32 => Value::Float(f32::from_bits(read_bits(bytes, 4, order) as u32) as f64),
        PrimKind::F64 => Value::Float(f64::from_bits(read_bits(bytes, 8, order))),
        PrimKind::Bool => Value::Bool(bytes[0] != 0),
        PrimKind::Char => Value::Char(encoding.decode_char(bytes[0])?),
    };
    Ok(value)
}
