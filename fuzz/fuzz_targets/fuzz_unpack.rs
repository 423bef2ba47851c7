//! Fuzz testing for the unpacker.
//!
//! Builds a record type from an arbitrary field recipe, then feeds it
//! arbitrary bytes. Unpacking must never panic: it either produces a
//! validated instance or returns an error. When it succeeds, packing the
//! result must reproduce a byte string of the declared width.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use recpack::{ByteOrder, FieldDecl, FieldKind, FillerPolicy, PrimKind, StructDef};

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzPrim {
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

impl FuzzPrim {
    fn kind(self) -> PrimKind {
        match self {
            FuzzPrim::U8 => PrimKind::U8,
            FuzzPrim::U16 => PrimKind::U16,
            FuzzPrim::U32 => PrimKind::U32,
            FuzzPrim::U64 => PrimKind::U64,
            FuzzPrim::I8 => PrimKind::I8,
            FuzzPrim::I16 => PrimKind::I16,
            FuzzPrim::I32 => PrimKind::I32,
            FuzzPrim::I64 => PrimKind::I64,
            FuzzPrim::F32 => PrimKind::F32,
            FuzzPrim::F64 => PrimKind::F64,
            FuzzPrim::Bool => PrimKind::Bool,
            FuzzPrim::Char => PrimKind::Char,
        }
    }
}

#[derive(Debug, Arbitrary)]
enum FuzzField {
    Prim(FuzzPrim),
    Str { len: u8 },
    Bytes { len: u8 },
    Padding { len: u8 },
    Array { element: FuzzPrim, count: u8, filled: bool },
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    order: u8,
    fields: Vec<FuzzField>,
    data: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let order = match input.order % 4 {
        0 => ByteOrder::Native,
        1 => ByteOrder::LittleEndian,
        2 => ByteOrder::BigEndian,
        _ => ByteOrder::Network,
    };

    let mut builder = StructDef::builder("Fuzz", order);
    for (index, field) in input.fields.iter().take(12).enumerate() {
        let name = format!("f{}", index);
        let decl = match field {
            FuzzField::Prim(prim) => FieldDecl::new(name, FieldKind::Prim(prim.kind())),
            FuzzField::Str { len } => FieldDecl::new(name, FieldKind::Str).with_len(*len as usize),
            FuzzField::Bytes { len } => {
                FieldDecl::new(name, FieldKind::Bytes).with_len(*len as usize)
            }
            FuzzField::Padding { len } => {
                FieldDecl::new(name, FieldKind::Padding).with_len(*len as usize)
            }
            FuzzField::Array { element, count, filled } => {
                let decl = FieldDecl::new(
                    name,
                    FieldKind::array(FieldDecl::element(FieldKind::Prim(element.kind()))),
                )
                .with_len(*count as usize % 16);
                if *filled {
                    decl.with_filler(FillerPolicy::Value(element.kind().zero()))
                } else {
                    decl
                }
            }
        };
        builder = builder.field(decl);
    }

    // zero lengths are legal fuzz input but rejected at compile time
    let def = match builder.build() {
        Ok(def) => def,
        Err(_) => return,
    };

    if let Ok(instance) = def.unpack(&input.data) {
        let bytes = instance.pack().expect("round-trip pack of an unpacked instance");
        assert_eq!(bytes.len(), def.width());
    }
});
