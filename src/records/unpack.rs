//! # Unpacker
//!
//! Consumes a byte string of exactly the record type's width and produces a
//! validated instance. The structural stage (`unpack_raw`) builds a plain
//! value dictionary from the descriptor schedule; the model layer then
//! validates that dictionary into an [`Instance`]. Padding bytes are
//! skipped and outlet bytes discarded — the computed provider recomputes on
//! demand after validation.

use eyre::Result;

use crate::encoding::{primitive, ByteOrder};
use crate::error::{codec_bail, CodecErrorKind};
use crate::layout::FieldDescriptor;
use crate::schema::{FillerPolicy, Instance, StructDef};
use crate::types::{Value, ValueMap};

use super::pack::element_zero;
use super::union;

/// Unpacks `bytes` into a validated instance of `def`.
pub fn unpack(def: &StructDef, bytes: &[u8]) -> Result<Instance> {
    let raw = unpack_raw(def, bytes)?;
    def.validate(raw)
}

/// Structural stage: bytes → raw value dictionary, no validation. Also the
/// per-member trial step of the union discrimination engine.
pub(crate) fn unpack_raw(def: &StructDef, bytes: &[u8]) -> Result<ValueMap> {
    if bytes.len() != def.width() {
        codec_bail!(
            CodecErrorKind::LengthMismatch,
            "'{}' unpacks exactly {} bytes, got {}",
            def.name(),
            def.width(),
            bytes.len()
        );
    }

    let layout = def.layout();
    let mut values = ValueMap::with_capacity(layout.slots().len());
    for slot in layout.slots() {
        let region = &bytes[slot.offset()..slot.offset() + slot.descriptor().width()];
        if let Some(value) = decode_value(slot.descriptor(), region, layout.byte_order())? {
            values.insert(slot.name().to_string(), value);
        }
    }
    Ok(values)
}

/// Decodes one field's byte region. `None` for padding and outlet fields,
/// which produce no dictionary entry.
fn decode_value(
    descriptor: &FieldDescriptor,
    region: &[u8],
    order: ByteOrder,
) -> Result<Option<Value>> {
    let value = match descriptor {
        FieldDescriptor::Padding { .. } | FieldDescriptor::Outlet { .. } => return Ok(None),
        FieldDescriptor::Primitive { kind, encoding } => {
            primitive::decode(*kind, region, order, *encoding)?
        }
        FieldDescriptor::Str { encoding, .. } => {
            // the reservation is zero-padded; everything after the first
            // NUL is padding, a full reservation has no terminator
            let end = region.iter().position(|&b| b == 0).unwrap_or(region.len());
            Value::Text(encoding.decode(&region[..end])?)
        }
        FieldDescriptor::Bytes { .. } => Value::Bytes(region.to_vec()),
        FieldDescriptor::Array {
            element,
            count,
            filler,
            retain_fillers,
            ..
        } => {
            let element_width = element.width();
            let mut items = Vec::with_capacity(*count);
            for index in 0..*count {
                let element_region = &region[index * element_width..(index + 1) * element_width];
                let item = decode_value(element, element_region, order)?
                    .expect("array elements always decode to a value");
                items.push(item);
            }
            if !filler.is_none() && !retain_fillers {
                trim_trailing_fillers(&mut items, filler, element);
            }
            Value::List(items)
        }
        FieldDescriptor::Nested { def } => Value::Struct(unpack(def, region)?),
        FieldDescriptor::Union {
            members,
            discriminator,
            ..
        } => Value::Struct(union::discriminate(members, discriminator, region)?),
    };
    Ok(Some(value))
}

/// Removes trailing elements equal to the configured filler. Non-trailing
/// fillers are retained.
fn trim_trailing_fillers(items: &mut Vec<Value>, filler: &FillerPolicy, element: &FieldDescriptor) {
    while let Some(last) = items.last() {
        let index = items.len() - 1;
        let fill = match filler {
            FillerPolicy::Default => element_zero(element),
            FillerPolicy::Value(value) => value.clone(),
            FillerPolicy::Custom(provider) => provider(index),
            FillerPolicy::None => return,
        };
        if last.loose_eq(&fill) {
            items.pop();
        } else {
            return;
        }
    }
}
