//! Fuzz testing for union discrimination.
//!
//! Builds a by-field discriminated union of several tagged member types and
//! feeds it arbitrary byte regions. Discrimination must never panic and,
//! when a member matches, the returned instance must belong to the member
//! whose literal admits the leading tag byte.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use recpack::{ByteOrder, FieldDecl, FieldKind, PrimKind, StructDef, Value};

#[derive(Debug, Arbitrary)]
struct UnionInput {
    member_count: u8,
    by_field: bool,
    data: Vec<u8>,
}

fuzz_target!(|input: UnionInput| {
    let member_count = (input.member_count % 6) as usize + 1;

    let members: Vec<_> = (0..member_count)
        .map(|tag| {
            StructDef::builder(format!("Member{}", tag), ByteOrder::BigEndian)
                .field(
                    FieldDecl::new("tag", FieldKind::Prim(PrimKind::U8)).with_literal(tag as u8),
                )
                .field(FieldDecl::new("payload", FieldKind::Bytes).with_len(tag + 1))
                .build()
                .unwrap()
        })
        .collect();

    let mut decl = FieldDecl::new("body", FieldKind::Union(members.clone()));
    if input.by_field {
        decl = decl.with_discriminator("tag");
    }
    let envelope = StructDef::builder("Envelope", ByteOrder::BigEndian)
        .field(decl)
        .build()
        .unwrap();

    if input.data.len() != envelope.width() {
        assert!(envelope.unpack(&input.data).is_err());
        return;
    }

    if let Ok(instance) = envelope.unpack(&input.data) {
        let body = match instance.get("body") {
            Some(Value::Struct(body)) => body.clone(),
            other => panic!("union decoded a non-struct body: {:?}", other),
        };
        // the winning member's literal must admit the tag byte it decoded
        assert_eq!(body.get("tag"), Some(&Value::UInt(input.data[0] as u64)));
        assert!(members.iter().any(|member| body.is(member)));

        let bytes = instance.pack().expect("round-trip pack of an unpacked union");
        assert_eq!(bytes.len(), envelope.width());
    }
});
