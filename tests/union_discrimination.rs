//! Union discrimination engine integration tests.
//!
//! Covers both strategies end to end: left-to-right trials with error
//! accumulation, and by-field selection on a shared discriminator field.

use recpack::{
    record_values, ByteOrder, CodecError, CodecErrorKind, FieldDecl, FieldKind, PrimKind,
    StructDef, Value,
};
use std::sync::Arc;

fn codec_kind(err: &eyre::Report) -> Option<CodecErrorKind> {
    err.downcast_ref::<CodecError>().map(|e| e.kind())
}

/// Two member types in the shape of spec'd startup/shutdown telemetry:
/// both begin with a one-byte tag carrying a literal.
fn tagged_members() -> (Arc<StructDef>, Arc<StructDef>) {
    let a = StructDef::builder("VariantA", ByteOrder::BigEndian)
        .field(FieldDecl::new("tag", FieldKind::Prim(PrimKind::U8)).with_literal(4u8))
        .field(FieldDecl::new("big", FieldKind::Prim(PrimKind::U64)))
        .field(FieldDecl::new("small", FieldKind::Prim(PrimKind::I8)))
        .build()
        .unwrap();
    let b = StructDef::builder("VariantB", ByteOrder::BigEndian)
        .field(FieldDecl::new("tag", FieldKind::Prim(PrimKind::U8)).with_literal(5u8))
        .field(FieldDecl::new("small", FieldKind::Prim(PrimKind::I8)))
        .field(FieldDecl::new("big", FieldKind::Prim(PrimKind::U64)))
        .build()
        .unwrap();
    (a, b)
}

#[test]
fn union_width_is_the_max_member_width() {
    let (a, b) = tagged_members();
    let narrow = StructDef::builder("Narrow", ByteOrder::BigEndian)
        .field(FieldDecl::new("tag", FieldKind::Prim(PrimKind::U8)).with_literal(9u8))
        .build()
        .unwrap();

    let def = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(
            FieldDecl::new("body", FieldKind::Union(vec![a.clone(), b.clone(), narrow]))
                .with_discriminator("tag"),
        )
        .build()
        .unwrap();

    assert_eq!(def.width(), a.width().max(b.width()).max(1));
    assert_eq!(def.width(), 10);
}

#[test]
fn by_field_selects_the_member_whose_literal_admits_the_tag() {
    let (a, b) = tagged_members();
    let def = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(
            FieldDecl::new("body", FieldKind::Union(vec![a.clone(), b.clone()]))
                .with_discriminator("tag"),
        )
        .build()
        .unwrap();

    let body = b
        .validate(record_values! {"tag" => 5u8, "small" => -2i8, "big" => 0x0102u64})
        .unwrap();
    let instance = def.validate(record_values! {"body" => body.clone()}).unwrap();

    let bytes = instance.pack().unwrap();
    assert_eq!(bytes.len(), 10);
    assert_eq!(bytes[0], 0x05);

    let back = def.unpack(&bytes).unwrap();
    let unpacked_body = match back.get("body").unwrap() {
        Value::Struct(instance) => instance,
        other => panic!("expected a struct body, got {:?}", other),
    };
    assert!(unpacked_body.is(&b));
    assert_eq!(unpacked_body, &body);
}

#[test]
fn shorter_members_are_right_padded_with_zeros() {
    let (a, _) = tagged_members();
    let narrow = StructDef::builder("Narrow", ByteOrder::BigEndian)
        .field(FieldDecl::new("tag", FieldKind::Prim(PrimKind::U8)).with_literal(9u8))
        .field(FieldDecl::new("v", FieldKind::Prim(PrimKind::U8)))
        .build()
        .unwrap();

    let def = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(
            FieldDecl::new("body", FieldKind::Union(vec![a, narrow.clone()]))
                .with_discriminator("tag"),
        )
        .build()
        .unwrap();

    let body = narrow
        .validate(record_values! {"tag" => 9u8, "v" => 0xAAu8})
        .unwrap();
    let instance = def.validate(record_values! {"body" => body}).unwrap();

    let bytes = instance.pack().unwrap();
    assert_eq!(bytes, [0x09, 0xAA, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn by_field_rejects_a_tag_no_member_admits() {
    let (a, b) = tagged_members();
    let def = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(
            FieldDecl::new("body", FieldKind::Union(vec![a, b])).with_discriminator("tag"),
        )
        .build()
        .unwrap();

    let mut bytes = vec![0u8; def.width()];
    bytes[0] = 0x77;
    let err = def.unpack(&bytes).unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::UnionNoMatch));
}

#[test]
fn left_to_right_takes_the_first_member_that_validates() {
    // members distinguished by a range constraint rather than a tag byte
    let low = StructDef::builder("Low", ByteOrder::BigEndian)
        .field(FieldDecl::new("v", FieldKind::Prim(PrimKind::U8)).with_range(0, 99))
        .build()
        .unwrap();
    let high = StructDef::builder("High", ByteOrder::BigEndian)
        .field(FieldDecl::new("v", FieldKind::Prim(PrimKind::U8)).with_range(100, 255))
        .build()
        .unwrap();

    let def = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(FieldDecl::new("body", FieldKind::Union(vec![low.clone(), high.clone()])))
        .build()
        .unwrap();

    let back = def.unpack(&[42]).unwrap();
    match back.get("body").unwrap() {
        Value::Struct(instance) => assert!(instance.is(&low)),
        other => panic!("expected a struct body, got {:?}", other),
    }

    let back = def.unpack(&[200]).unwrap();
    match back.get("body").unwrap() {
        Value::Struct(instance) => assert!(instance.is(&high)),
        other => panic!("expected a struct body, got {:?}", other),
    }
}

#[test]
fn left_to_right_prefers_the_earlier_member_on_overlap() {
    let first = StructDef::builder("First", ByteOrder::BigEndian)
        .field(FieldDecl::new("v", FieldKind::Prim(PrimKind::U8)))
        .build()
        .unwrap();
    let second = StructDef::builder("Second", ByteOrder::BigEndian)
        .field(FieldDecl::new("v", FieldKind::Prim(PrimKind::U8)))
        .build()
        .unwrap();

    let def = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(FieldDecl::new(
            "body",
            FieldKind::Union(vec![first.clone(), second]),
        ))
        .build()
        .unwrap();

    let back = def.unpack(&[1]).unwrap();
    match back.get("body").unwrap() {
        Value::Struct(instance) => assert!(instance.is(&first)),
        other => panic!("expected a struct body, got {:?}", other),
    }
}

#[test]
fn left_to_right_reports_every_failed_trial() {
    let low = StructDef::builder("Low", ByteOrder::BigEndian)
        .field(FieldDecl::new("v", FieldKind::Prim(PrimKind::U8)).with_range(0, 9))
        .build()
        .unwrap();
    let lower = StructDef::builder("Lower", ByteOrder::BigEndian)
        .field(FieldDecl::new("v", FieldKind::Prim(PrimKind::U8)).with_range(10, 19))
        .build()
        .unwrap();

    let def = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(FieldDecl::new("body", FieldKind::Union(vec![low, lower])))
        .build()
        .unwrap();

    let err = def.unpack(&[200]).unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::UnionNoMatch));
    let message = format!("{:#}", err);
    assert!(message.contains("Low"));
    assert!(message.contains("Lower"));
}

#[test]
fn members_of_different_widths_only_read_their_own_bytes() {
    let wide = StructDef::builder("Wide", ByteOrder::BigEndian)
        .field(FieldDecl::new("tag", FieldKind::Prim(PrimKind::U8)).with_literal(1u8))
        .field(FieldDecl::new("rest", FieldKind::Bytes).with_len(7))
        .build()
        .unwrap();
    let slim = StructDef::builder("Slim", ByteOrder::BigEndian)
        .field(FieldDecl::new("tag", FieldKind::Prim(PrimKind::U8)).with_literal(2u8))
        .build()
        .unwrap();

    let def = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(
            FieldDecl::new("body", FieldKind::Union(vec![wide, slim.clone()]))
                .with_discriminator("tag"),
        )
        .build()
        .unwrap();

    // tag 2 selects the one-byte member; trailing garbage is not its concern
    let mut bytes = vec![0xEEu8; def.width()];
    bytes[0] = 0x02;
    let back = def.unpack(&bytes).unwrap();
    match back.get("body").unwrap() {
        Value::Struct(instance) => assert!(instance.is(&slim)),
        other => panic!("expected a struct body, got {:?}", other),
    }
}

#[test]
fn packing_a_non_member_instance_is_a_union_error() {
    let (a, b) = tagged_members();
    let stray = StructDef::builder("Stray", ByteOrder::BigEndian)
        .field(FieldDecl::new("tag", FieldKind::Prim(PrimKind::U8)).with_literal(4u8))
        .build()
        .unwrap();

    let def = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(FieldDecl::new("body", FieldKind::Union(vec![a, b])).with_discriminator("tag"))
        .build()
        .unwrap();

    // validation refuses the foreign instance before packing ever starts
    let outsider = stray.validate(record_values! {"tag" => 4u8}).unwrap();
    assert!(def.validate(record_values! {"body" => outsider}).is_err());
}
