//! # Field Descriptors
//!
//! One descriptor variant per field kind. Each exposes its total byte width
//! and, for `native-aligned` layouts, its natural alignment. The encode and
//! decode contracts live in `records::pack` and `records::unpack`; the
//! descriptor itself is pure metadata.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::encoding::{ByteOrder, Encoding};
use crate::schema::{FillerPolicy, StructDef};
use crate::types::{ArrayContainer, PrimKind};

/// Union member selection strategy during unpack.
#[derive(Debug, Clone)]
pub enum Discriminator {
    /// Try members in declaration order; first to unpack and validate wins.
    LeftToRight,
    /// Inspect the named field after structural unpack; the first member
    /// whose literal/one-of constraint admits the raw value wins.
    ByField(String),
}

#[derive(Debug, Clone)]
pub enum FieldDescriptor {
    Primitive {
        kind: PrimKind,
        /// String encoding governing `Char` fields; unused by other kinds.
        encoding: Encoding,
    },
    Str {
        byte_len: usize,
        encoding: Encoding,
        strict: bool,
    },
    Bytes {
        byte_len: usize,
    },
    Padding {
        byte_len: usize,
    },
    Array {
        element: Box<FieldDescriptor>,
        count: usize,
        filler: FillerPolicy,
        retain_fillers: bool,
        container: ArrayContainer,
    },
    Nested {
        def: Arc<StructDef>,
    },
    Union {
        members: Vec<Arc<StructDef>>,
        width: usize,
        discriminator: Discriminator,
    },
    Outlet {
        kind: PrimKind,
        encoding: Encoding,
        /// Stem name of the computed provider supplying the packed value.
        source: String,
    },
}

impl FieldDescriptor {
    pub fn width(&self) -> usize {
        match self {
            FieldDescriptor::Primitive { kind, .. } => kind.width(),
            FieldDescriptor::Str { byte_len, .. } => *byte_len,
            FieldDescriptor::Bytes { byte_len } => *byte_len,
            FieldDescriptor::Padding { byte_len } => *byte_len,
            FieldDescriptor::Array { element, count, .. } => element.width() * count,
            FieldDescriptor::Nested { def } => def.width(),
            FieldDescriptor::Union { width, .. } => *width,
            FieldDescriptor::Outlet { kind, .. } => kind.width(),
        }
    }

    /// Natural alignment under the host C ABI; consulted only for
    /// `native-aligned` layouts.
    pub fn alignment(&self) -> usize {
        match self {
            FieldDescriptor::Primitive { kind, .. } | FieldDescriptor::Outlet { kind, .. } => {
                kind.width()
            }
            FieldDescriptor::Str { .. }
            | FieldDescriptor::Bytes { .. }
            | FieldDescriptor::Padding { .. } => 1,
            FieldDescriptor::Array { element, .. } => element.alignment(),
            FieldDescriptor::Nested { def } => def.layout().alignment(),
            FieldDescriptor::Union { members, .. } => members
                .iter()
                .map(|m| m.layout().alignment())
                .max()
                .unwrap_or(1),
        }
    }
}

/// One scheduled field: name, descriptor and precomputed byte offset.
#[derive(Debug, Clone)]
pub struct FieldSlot {
    pub(crate) name: String,
    pub(crate) offset: usize,
    pub(crate) descriptor: FieldDescriptor,
}

impl FieldSlot {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }
}

/// The compiled, immutable schedule of a record type.
#[derive(Debug, Clone)]
pub struct Layout {
    pub(crate) slots: SmallVec<[FieldSlot; 8]>,
    pub(crate) width: usize,
    pub(crate) alignment: usize,
    pub(crate) order: ByteOrder,
}

impl Layout {
    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    pub fn slot(&self, name: &str) -> Option<&FieldSlot> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Total width in bytes of any packed instance.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn alignment(&self) -> usize {
        self.alignment
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }
}
