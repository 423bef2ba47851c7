//! # Primitive Field Kinds
//!
//! `PrimKind` enumerates every primitive a record field can carry, together
//! with its packed width in bytes and, for integers, the admissible value
//! range. The codec table in `encoding::primitive` keys off this enum.
//!
//! | Kind | Width | Range / domain |
//! |------|-------|----------------|
//! | U8   | 1 | 0 ..= 255 |
//! | U16  | 2 | 0 ..= 65_535 |
//! | U32  | 4 | 0 ..= 4_294_967_295 |
//! | U64  | 8 | 0 ..= u64::MAX |
//! | I8   | 1 | -128 ..= 127 |
//! | I16  | 2 | -32_768 ..= 32_767 |
//! | I32  | 4 | i32 range |
//! | I64  | 8 | i64 range |
//! | F32  | 4 | IEEE-754 binary32 |
//! | F64  | 8 | IEEE-754 binary64 |
//! | Bool | 1 | false → 0x00, true → 0x01; nonzero decodes true |
//! | Char | 1 | one byte in the record's string encoding |

use crate::types::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Char,
}

impl PrimKind {
    pub fn width(self) -> usize {
        match self {
            PrimKind::U8 | PrimKind::I8 | PrimKind::Bool | PrimKind::Char => 1,
            PrimKind::U16 | PrimKind::I16 => 2,
            PrimKind::U32 | PrimKind::I32 | PrimKind::F32 => 4,
            PrimKind::U64 | PrimKind::I64 | PrimKind::F64 => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimKind::U8 => "uint8",
            PrimKind::U16 => "uint16",
            PrimKind::U32 => "uint32",
            PrimKind::U64 => "uint64",
            PrimKind::I8 => "int8",
            PrimKind::I16 => "int16",
            PrimKind::I32 => "int32",
            PrimKind::I64 => "int64",
            PrimKind::F32 => "float32",
            PrimKind::F64 => "float64",
            PrimKind::Bool => "bool",
            PrimKind::Char => "char",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimKind::U8
                | PrimKind::U16
                | PrimKind::U32
                | PrimKind::U64
                | PrimKind::I8
                | PrimKind::I16
                | PrimKind::I32
                | PrimKind::I64
        )
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            PrimKind::I8 | PrimKind::I16 | PrimKind::I32 | PrimKind::I64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, PrimKind::F32 | PrimKind::F64)
    }

    /// Admissible integer range, `None` for non-integer kinds.
    pub fn bounds(self) -> Option<(i128, i128)> {
        match self {
            PrimKind::U8 => Some((0, u8::MAX as i128)),
            PrimKind::U16 => Some((0, u16::MAX as i128)),
            PrimKind::U32 => Some((0, u32::MAX as i128)),
            PrimKind::U64 => Some((0, u64::MAX as i128)),
            PrimKind::I8 => Some((i8::MIN as i128, i8::MAX as i128)),
            PrimKind::I16 => Some((i16::MIN as i128, i16::MAX as i128)),
            PrimKind::I32 => Some((i32::MIN as i128, i32::MAX as i128)),
            PrimKind::I64 => Some((i64::MIN as i128, i64::MAX as i128)),
            _ => None,
        }
    }

    /// The zero value for this kind, used as the `Default` array filler.
    pub fn zero(self) -> Value {
        match self {
            PrimKind::U8 | PrimKind::U16 | PrimKind::U32 | PrimKind::U64 => Value::UInt(0),
            PrimKind::I8 | PrimKind::I16 | PrimKind::I32 | PrimKind::I64 => Value::Int(0),
            PrimKind::F32 | PrimKind::F64 => Value::Float(0.0),
            PrimKind::Bool => Value::Bool(false),
            PrimKind::Char => Value::Char('\0'),
        }
    }
}
