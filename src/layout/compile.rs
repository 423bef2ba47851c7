//! # Layout Compiler
//!
//! `compile` turns a record type's flattened declaration list into a
//! [`Layout`]. It resolves each declared field into exactly one descriptor,
//! checks every compile-time invariant, and precomputes per-field offsets
//! and the total width.
//!
//! ## Compile-time diagnostics
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | `MissingLength` | a length-annotated kind lacks `with_len`, or declares a zero width |
//! | `UnknownKind` | an array element is `Padding`/`Outlet`, or a union has no members |
//! | `FillerUnsupported` | a `Default` filler on an element kind with no natural zero |
//! | `OutletMismatch` | an outlet name without `_outlet`, a missing provider, or a provider of the wrong kind |
//! | `DiscriminatorMissing` | a by-field union member lacking the discriminator field or a literal/one-of constraint on it |
//! | `DuplicateField` | two declared fields sharing a name after flattening |
//!
//! Errors abort record-type construction and are never retried.

use eyre::Result;
use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::encoding::ByteOrder;
use crate::error::{codec_bail, CodecErrorKind};
use crate::layout::descriptor::{Discriminator, FieldDescriptor, FieldSlot, Layout};
use crate::schema::def::ComputedDecl;
use crate::schema::{FieldDecl, FieldKind, FillerPolicy};

const OUTLET_SUFFIX: &str = "_outlet";

fn round_up(offset: usize, alignment: usize) -> usize {
    offset.div_ceil(alignment) * alignment
}

/// Compiles the declaration list of record type `name` into a layout.
/// Declarations must already be flattened (base-type fields first); fields
/// whose name begins with `_` are model-private and skipped.
pub fn compile(
    name: &str,
    fields: &[FieldDecl],
    computed: &[ComputedDecl],
    order: ByteOrder,
) -> Result<Layout> {
    let mut seen: HashSet<&str> = HashSet::new();
    for decl in fields {
        if !seen.insert(decl.name()) {
            codec_bail!(
                CodecErrorKind::DuplicateField,
                "field '{}' is declared more than once in '{}'",
                decl.name(),
                name
            );
        }
    }

    let mut slots: SmallVec<[FieldSlot; 8]> = SmallVec::new();
    let mut offset = 0usize;
    let mut alignment = 1usize;

    for decl in fields {
        if decl.is_private() {
            continue;
        }
        let descriptor = resolve(name, decl, computed)?;
        let field_alignment = descriptor.alignment();
        alignment = alignment.max(field_alignment);
        if order.aligned() {
            offset = round_up(offset, field_alignment);
        }
        let field_width = descriptor.width();
        slots.push(FieldSlot {
            name: decl.name().to_string(),
            offset,
            descriptor,
        });
        offset += field_width;
    }

    let width = if order.aligned() {
        round_up(offset, alignment)
    } else {
        offset
    };

    Ok(Layout {
        slots,
        width,
        alignment,
        order,
    })
}

/// Resolves one declaration into exactly one descriptor.
fn resolve(record: &str, decl: &FieldDecl, computed: &[ComputedDecl]) -> Result<FieldDescriptor> {
    let descriptor = match decl.kind() {
        FieldKind::Prim(kind) => FieldDescriptor::Primitive {
            kind: *kind,
            encoding: decl.encoding(),
        },
        FieldKind::Str => FieldDescriptor::Str {
            byte_len: require_len(record, decl)?,
            encoding: decl.encoding(),
            strict: decl.is_strict_overflow(),
        },
        FieldKind::Bytes => FieldDescriptor::Bytes {
            byte_len: require_len(record, decl)?,
        },
        FieldKind::Padding => FieldDescriptor::Padding {
            byte_len: require_len(record, decl)?,
        },
        FieldKind::Array { element, container } => {
            let count = require_len(record, decl)?;
            match element.kind() {
                FieldKind::Padding | FieldKind::Outlet(_) => codec_bail!(
                    CodecErrorKind::UnknownKind,
                    "array field '{}' in '{}' cannot have {} elements",
                    decl.name(),
                    record,
                    match element.kind() {
                        FieldKind::Padding => "padding",
                        _ => "outlet",
                    }
                ),
                _ => {}
            }
            let element_desc = resolve(record, element, computed)?;
            if matches!(decl.filler(), FillerPolicy::Default)
                && matches!(
                    element_desc,
                    FieldDescriptor::Nested { .. } | FieldDescriptor::Union { .. }
                )
            {
                codec_bail!(
                    CodecErrorKind::FillerUnsupported,
                    "array field '{}' in '{}': default filler needs an element kind with a zero value",
                    decl.name(),
                    record
                );
            }
            FieldDescriptor::Array {
                element: Box::new(element_desc),
                count,
                filler: decl.filler().clone(),
                retain_fillers: decl.retains_fillers(),
                container: *container,
            }
        }
        FieldKind::Nested(def) => FieldDescriptor::Nested { def: def.clone() },
        FieldKind::Union(members) => {
            if members.is_empty() {
                codec_bail!(
                    CodecErrorKind::UnknownKind,
                    "union field '{}' in '{}' has no member types",
                    decl.name(),
                    record
                );
            }
            let discriminator = match decl.discriminator() {
                Some(field) => {
                    for member in members {
                        let member_field = member.field(field);
                        match member_field {
                            None => codec_bail!(
                                CodecErrorKind::DiscriminatorMissing,
                                "union member '{}' has no field '{}' for union '{}' in '{}'",
                                member.name(),
                                field,
                                decl.name(),
                                record
                            ),
                            Some(f) if f.admission().is_none() => codec_bail!(
                                CodecErrorKind::DiscriminatorMissing,
                                "union member '{}' declares no literal or one-of constraint \
                                 on discriminator field '{}'",
                                member.name(),
                                field
                            ),
                            Some(_) => {}
                        }
                    }
                    Discriminator::ByField(field.to_string())
                }
                None => Discriminator::LeftToRight,
            };
            let width = members.iter().map(|m| m.width()).max().unwrap_or(0);
            FieldDescriptor::Union {
                members: members.clone(),
                width,
                discriminator,
            }
        }
        FieldKind::Outlet(kind) => {
            let stem = match decl.name().strip_suffix(OUTLET_SUFFIX) {
                Some(stem) if !stem.is_empty() => stem,
                _ => codec_bail!(
                    CodecErrorKind::OutletMismatch,
                    "outlet field '{}' in '{}' must be named '<provider>{}'",
                    decl.name(),
                    record,
                    OUTLET_SUFFIX
                ),
            };
            let provider = computed.iter().find(|c| c.name() == stem);
            match provider {
                None => codec_bail!(
                    CodecErrorKind::OutletMismatch,
                    "outlet field '{}' in '{}' has no computed provider '{}'",
                    decl.name(),
                    record,
                    stem
                ),
                Some(p) if p.kind() != *kind => codec_bail!(
                    CodecErrorKind::OutletMismatch,
                    "computed provider '{}' in '{}' yields {}, outlet expects {}",
                    stem,
                    record,
                    p.kind().name(),
                    kind.name()
                ),
                Some(_) => {}
            }
            FieldDescriptor::Outlet {
                kind: *kind,
                encoding: decl.encoding(),
                source: stem.to_string(),
            }
        }
    };

    // every descriptor must occupy at least one byte
    if descriptor.width() == 0 {
        codec_bail!(
            CodecErrorKind::MissingLength,
            "field '{}' in '{}' has zero width",
            decl.name(),
            record
        );
    }
    Ok(descriptor)
}

fn require_len(record: &str, decl: &FieldDecl) -> Result<usize> {
    match decl.len() {
        Some(len) if len > 0 => Ok(len),
        Some(_) => codec_bail!(
            CodecErrorKind::MissingLength,
            "field '{}' in '{}' declares a zero length",
            decl.name(),
            record
        ),
        None => codec_bail!(
            CodecErrorKind::MissingLength,
            "field '{}' in '{}' requires a length annotation",
            decl.name(),
            record
        ),
    }
}
