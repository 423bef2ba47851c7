//! # Error Types
//!
//! Two failure families cross the crate boundary:
//!
//! - [`CodecError`]: structural errors raised by the codec itself, at
//!   record-type construction time (layout compilation) or at pack/unpack
//!   time. Each carries a [`CodecErrorKind`] so callers can classify
//!   failures without parsing messages.
//! - [`ValidationError`]: raised by the model layer when a value dictionary
//!   does not satisfy the declared constraints of a record type.
//!
//! Both families implement `std::error::Error` and travel inside
//! `eyre::Report`, so call sites classify with `downcast_ref`. Compile-time
//! errors abort record-type construction and are never retried. Pack errors
//! propagate immediately. Unpack errors propagate immediately except inside
//! union trial-unpacking, where either family disqualifies the trial member
//! and is accumulated into a `UnionNoMatch`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErrorKind {
    // compile time
    MissingLength,
    OutletMismatch,
    UnknownKind,
    DuplicateField,
    FillerUnsupported,
    DiscriminatorMissing,
    // pack/unpack time
    IntegerRange,
    CharEncoding,
    StringDecode,
    BytesOverflow,
    ArrayOverflow,
    ArrayUnderflow,
    LengthMismatch,
    UnionNoMatch,
}

impl CodecErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            CodecErrorKind::MissingLength => "missing length",
            CodecErrorKind::OutletMismatch => "outlet mismatch",
            CodecErrorKind::UnknownKind => "unknown kind",
            CodecErrorKind::DuplicateField => "duplicate field",
            CodecErrorKind::FillerUnsupported => "filler unsupported",
            CodecErrorKind::DiscriminatorMissing => "discriminator missing",
            CodecErrorKind::IntegerRange => "integer range",
            CodecErrorKind::CharEncoding => "char encoding",
            CodecErrorKind::StringDecode => "string decode",
            CodecErrorKind::BytesOverflow => "bytes overflow",
            CodecErrorKind::ArrayOverflow => "array overflow",
            CodecErrorKind::ArrayUnderflow => "array underflow",
            CodecErrorKind::LengthMismatch => "length mismatch",
            CodecErrorKind::UnionNoMatch => "union no match",
        }
    }

    /// Compile-time kinds abort record-type construction; the rest are
    /// raised while packing or unpacking.
    pub fn is_compile_time(self) -> bool {
        matches!(
            self,
            CodecErrorKind::MissingLength
                | CodecErrorKind::OutletMismatch
                | CodecErrorKind::UnknownKind
                | CodecErrorKind::DuplicateField
                | CodecErrorKind::FillerUnsupported
                | CodecErrorKind::DiscriminatorMissing
        )
    }
}

#[derive(Debug, Clone)]
pub struct CodecError {
    kind: CodecErrorKind,
    message: String,
}

impl CodecError {
    pub fn new(kind: CodecErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> CodecErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.name(), self.message)
    }
}

impl std::error::Error for CodecError {}

#[derive(Debug, Clone)]
pub struct ValidationError {
    field: Option<String>,
    message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn whole_record(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "validation failed on field '{}': {}", field, self.message),
            None => write!(f, "validation failed: {}", self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Raises a [`CodecError`] of the given kind with a formatted message.
macro_rules! codec_bail {
    ($kind:expr, $($arg:tt)*) => {
        return Err($crate::error::CodecError::new($kind, format!($($arg)*)).into())
    };
}

pub(crate) use codec_bail;
