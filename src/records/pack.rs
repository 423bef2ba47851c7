//! # Packer
//!
//! Serializes a validated instance into a byte string whose length is
//! exactly the record type's width. The instance's dump dictionary (which
//! includes freshly evaluated computed values) is the single source of
//! field data; the buffer is zero-filled up front so padding fields, union
//! tail bytes and alignment gaps need no explicit writes.

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::encoding::{primitive, ByteOrder};
use crate::error::{codec_bail, CodecErrorKind};
use crate::layout::FieldDescriptor;
use crate::schema::{FillerPolicy, Instance, StructDef};
use crate::types::{Value, ValueMap};

/// Packs `instance` (which must belong to `def`) into `def.width()` bytes.
pub fn pack(def: &StructDef, instance: &Instance) -> Result<Vec<u8>> {
    ensure!(
        std::ptr::eq(Arc::as_ptr(instance.def()), def as *const StructDef),
        "instance of '{}' packed against record type '{}'",
        instance.def().name(),
        def.name()
    );

    let values = instance.dump();
    let layout = def.layout();
    let mut buf = vec![0u8; layout.width()];

    for slot in layout.slots() {
        let region = &mut buf[slot.offset()..slot.offset() + slot.descriptor().width()];
        encode_field(slot.name(), slot.descriptor(), &values, region, layout.byte_order())?;
    }

    Ok(buf)
}

fn encode_field(
    name: &str,
    descriptor: &FieldDescriptor,
    values: &ValueMap,
    out: &mut [u8],
    order: ByteOrder,
) -> Result<()> {
    match descriptor {
        // padding bytes stay zero
        FieldDescriptor::Padding { .. } => Ok(()),
        FieldDescriptor::Outlet { kind, encoding, source } => {
            let value = values.get(source).ok_or_else(|| {
                eyre::eyre!("computed provider '{}' produced no value for outlet '{}'", source, name)
            })?;
            primitive::encode(*kind, value, order, *encoding, out)
        }
        _ => {
            let value = values
                .get(name)
                .ok_or_else(|| eyre::eyre!("validated instance is missing field '{}'", name))?;
            encode_value(name, descriptor, value, out, order)
        }
    }
}

/// Encodes one value under one descriptor. `out` is exactly
/// `descriptor.width()` bytes and starts zeroed.
fn encode_value(
    name: &str,
    descriptor: &FieldDescriptor,
    value: &Value,
    out: &mut [u8],
    order: ByteOrder,
) -> Result<()> {
    match descriptor {
        FieldDescriptor::Primitive { kind, encoding } => {
            primitive::encode(*kind, value, order, *encoding, out)
        }
        FieldDescriptor::Str { byte_len, encoding, strict } => {
            let text = expect_text(name, value)?;
            let mut encoded = encoding.encode(text)?;
            if encoded.len() > *byte_len {
                if *strict {
                    codec_bail!(
                        CodecErrorKind::BytesOverflow,
                        "string field '{}' needs {} bytes but reserves {}",
                        name,
                        encoded.len(),
                        byte_len
                    );
                }
                // silent truncation; may split a codepoint in multi-byte
                // encodings, the reservation is in bytes not characters
                encoded.truncate(*byte_len);
            }
            out[..encoded.len()].copy_from_slice(&encoded);
            Ok(())
        }
        FieldDescriptor::Bytes { byte_len } => {
            let bytes = match value {
                Value::Bytes(b) => b,
                other => eyre::bail!(
                    "byte field '{}' expects raw bytes, got {}",
                    name,
                    other.kind_name()
                ),
            };
            if bytes.len() > *byte_len {
                codec_bail!(
                    CodecErrorKind::BytesOverflow,
                    "byte field '{}' holds {} bytes but reserves {}",
                    name,
                    bytes.len(),
                    byte_len
                );
            }
            out[..bytes.len()].copy_from_slice(bytes);
            Ok(())
        }
        FieldDescriptor::Array {
            element,
            count,
            filler,
            ..
        } => {
            let items = match value {
                Value::List(items) => items,
                other => eyre::bail!(
                    "array field '{}' expects a list, got {}",
                    name,
                    other.kind_name()
                ),
            };
            if items.len() > *count {
                codec_bail!(
                    CodecErrorKind::ArrayOverflow,
                    "array field '{}' holds {} elements but reserves {}",
                    name,
                    items.len(),
                    count
                );
            }
            let element_width = element.width();
            for index in 0..*count {
                let region = &mut out[index * element_width..(index + 1) * element_width];
                match items.get(index) {
                    Some(item) => encode_value(name, element, item, region, order)?,
                    None => {
                        let fill = filler_value(name, filler, element, index)?;
                        encode_value(name, element, &fill, region, order)?;
                    }
                }
            }
            Ok(())
        }
        FieldDescriptor::Nested { def } => {
            let instance = expect_instance(name, value)?;
            let bytes = def.pack(instance)?;
            out.copy_from_slice(&bytes);
            Ok(())
        }
        FieldDescriptor::Union { members, .. } => {
            let instance = expect_instance(name, value)?;
            let member = members.iter().find(|m| instance.is(m));
            let member = match member {
                Some(member) => member,
                None => codec_bail!(
                    CodecErrorKind::UnionNoMatch,
                    "'{}' is not a member type of union field '{}'",
                    instance.def().name(),
                    name
                ),
            };
            let bytes = member.pack(instance)?;
            // shorter members are right-padded with the zeroed tail
            out[..bytes.len()].copy_from_slice(&bytes);
            Ok(())
        }
        FieldDescriptor::Padding { .. } | FieldDescriptor::Outlet { .. } => {
            unreachable!("handled in encode_field; never array elements")
        }
    }
}

/// Resolves the filler element for a missing array slot.
fn filler_value(
    name: &str,
    filler: &FillerPolicy,
    element: &FieldDescriptor,
    index: usize,
) -> Result<Value> {
    match filler {
        FillerPolicy::None => codec_bail!(
            CodecErrorKind::ArrayUnderflow,
            "array field '{}' has no filler and too few elements",
            name
        ),
        FillerPolicy::Default => Ok(element_zero(element)),
        FillerPolicy::Value(value) => Ok(value.clone()),
        FillerPolicy::Custom(provider) => Ok(provider(index)),
    }
}

/// The zero value of an element descriptor. Compile rejects `Default`
/// fillers on element kinds without one.
pub(crate) fn element_zero(element: &FieldDescriptor) -> Value {
    match element {
        FieldDescriptor::Primitive { kind, .. } => kind.zero(),
        FieldDescriptor::Str { .. } => Value::Text(String::new()),
        FieldDescriptor::Bytes { .. } => Value::Bytes(Vec::new()),
        FieldDescriptor::Array { .. } => Value::List(Vec::new()),
        _ => Value::Null,
    }
}

fn expect_text<'v>(name: &str, value: &'v Value) -> Result<&'v str> {
    match value {
        Value::Text(s) => Ok(s),
        other => eyre::bail!(
            "string field '{}' expects text, got {}",
            name,
            other.kind_name()
        ),
    }
}

fn expect_instance<'v>(name: &str, value: &'v Value) -> Result<&'v Instance> {
    match value {
        Value::Struct(instance) => Ok(instance),
        other => eyre::bail!(
            "field '{}' expects a record instance, got {}",
            name,
            other.kind_name()
        ),
    }
}
