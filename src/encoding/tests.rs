//! Tests for the encoding layer

use super::*;
use crate::encoding::primitive::{decode, encode};
use crate::error::{CodecError, CodecErrorKind};
use crate::types::{PrimKind, Value};

fn codec_kind(err: &eyre::Report) -> Option<CodecErrorKind> {
    err.downcast_ref::<CodecError>().map(|e| e.kind())
}

#[test]
fn byte_order_parses_all_five_modes() {
    assert_eq!(ByteOrder::parse("native-aligned").unwrap(), ByteOrder::NativeAligned);
    assert_eq!(ByteOrder::parse("native").unwrap(), ByteOrder::Native);
    assert_eq!(ByteOrder::parse("little-endian").unwrap(), ByteOrder::LittleEndian);
    assert_eq!(ByteOrder::parse("big-endian").unwrap(), ByteOrder::BigEndian);
    assert_eq!(ByteOrder::parse("network").unwrap(), ByteOrder::Network);
}

#[test]
fn byte_order_rejects_unknown_name() {
    let err = ByteOrder::parse("middle-endian").unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::UnknownKind));
}

#[test]
fn network_is_big_endian() {
    assert!(!ByteOrder::Network.is_little());
    assert!(!ByteOrder::BigEndian.is_little());
    assert!(ByteOrder::LittleEndian.is_little());
}

#[test]
fn only_native_aligned_pads() {
    assert!(ByteOrder::NativeAligned.aligned());
    assert!(!ByteOrder::Native.aligned());
    assert!(!ByteOrder::BigEndian.aligned());
}

#[test]
fn u32_encodes_per_byte_order() {
    let mut buf = [0u8; 4];
    encode(
        PrimKind::U32,
        &Value::UInt(0x0102_0304),
        ByteOrder::BigEndian,
        Encoding::Utf8,
        &mut buf,
    )
    .unwrap();
    assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);

    encode(
        PrimKind::U32,
        &Value::UInt(0x0102_0304),
        ByteOrder::LittleEndian,
        Encoding::Utf8,
        &mut buf,
    )
    .unwrap();
    assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn signed_decode_sign_extends() {
    let value = decode(PrimKind::I16, &[0xFF, 0xFE], ByteOrder::BigEndian, Encoding::Utf8).unwrap();
    assert_eq!(value, Value::Int(-2));

    let value = decode(PrimKind::I8, &[0x80], ByteOrder::BigEndian, Encoding::Utf8).unwrap();
    assert_eq!(value, Value::Int(-128));
}

#[test]
fn negative_int_round_trips() {
    let mut buf = [0u8; 4];
    encode(
        PrimKind::I32,
        &Value::Int(-123_456),
        ByteOrder::LittleEndian,
        Encoding::Utf8,
        &mut buf,
    )
    .unwrap();
    let back = decode(PrimKind::I32, &buf, ByteOrder::LittleEndian, Encoding::Utf8).unwrap();
    assert_eq!(back, Value::Int(-123_456));
}

#[test]
fn floats_round_trip_per_order() {
    for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian, ByteOrder::Native] {
        let mut buf = [0u8; 4];
        encode(PrimKind::F32, &Value::Float(1.25), order, Encoding::Utf8, &mut buf).unwrap();
        assert_eq!(
            decode(PrimKind::F32, &buf, order, Encoding::Utf8).unwrap(),
            Value::Float(1.25)
        );

        let mut buf = [0u8; 8];
        encode(PrimKind::F64, &Value::Float(-0.1), order, Encoding::Utf8, &mut buf).unwrap();
        assert_eq!(
            decode(PrimKind::F64, &buf, order, Encoding::Utf8).unwrap(),
            Value::Float(-0.1)
        );
    }
}

#[test]
fn float_accepts_integer_input() {
    let mut buf = [0u8; 8];
    encode(PrimKind::F64, &Value::Int(3), ByteOrder::BigEndian, Encoding::Utf8, &mut buf).unwrap();
    assert_eq!(
        decode(PrimKind::F64, &buf, ByteOrder::BigEndian, Encoding::Utf8).unwrap(),
        Value::Float(3.0)
    );
}

#[test]
fn bool_encodes_one_byte_and_decodes_nonzero_true() {
    let mut buf = [0u8; 1];
    encode(PrimKind::Bool, &Value::Bool(true), ByteOrder::BigEndian, Encoding::Utf8, &mut buf)
        .unwrap();
    assert_eq!(buf, [0x01]);

    encode(PrimKind::Bool, &Value::Bool(false), ByteOrder::BigEndian, Encoding::Utf8, &mut buf)
        .unwrap();
    assert_eq!(buf, [0x00]);

    for byte in [0x01u8, 0x02, 0x7F, 0xFF] {
        assert_eq!(
            decode(PrimKind::Bool, &[byte], ByteOrder::BigEndian, Encoding::Utf8).unwrap(),
            Value::Bool(true)
        );
    }
    assert_eq!(
        decode(PrimKind::Bool, &[0x00], ByteOrder::BigEndian, Encoding::Utf8).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn out_of_range_integer_is_rejected_before_writing() {
    let mut buf = [0u8; 1];
    let err = encode(
        PrimKind::U8,
        &Value::UInt(256),
        ByteOrder::BigEndian,
        Encoding::Utf8,
        &mut buf,
    )
    .unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::IntegerRange));

    let err = encode(
        PrimKind::I8,
        &Value::Int(-129),
        ByteOrder::BigEndian,
        Encoding::Utf8,
        &mut buf,
    )
    .unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::IntegerRange));
}

#[test]
fn unsigned_accepts_int_variant_in_range() {
    let mut buf = [0u8; 2];
    encode(PrimKind::U16, &Value::Int(513), ByteOrder::BigEndian, Encoding::Utf8, &mut buf)
        .unwrap();
    assert_eq!(buf, [0x02, 0x01]);
}

#[test]
fn char_must_fit_one_byte_in_the_encoding() {
    let mut buf = [0u8; 1];
    encode(PrimKind::Char, &Value::Char('A'), ByteOrder::BigEndian, Encoding::Utf8, &mut buf)
        .unwrap();
    assert_eq!(buf, [0x41]);

    let err = encode(
        PrimKind::Char,
        &Value::Char('é'),
        ByteOrder::BigEndian,
        Encoding::Utf8,
        &mut buf,
    )
    .unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::CharEncoding));

    // latin-1 fits é in one byte
    encode(PrimKind::Char, &Value::Char('é'), ByteOrder::BigEndian, Encoding::Latin1, &mut buf)
        .unwrap();
    assert_eq!(buf, [0xE9]);
}

#[test]
fn char_decode_rejects_non_ascii_byte_under_utf8() {
    let err = decode(PrimKind::Char, &[0xE9], ByteOrder::BigEndian, Encoding::Utf8).unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::StringDecode));

    assert_eq!(
        decode(PrimKind::Char, &[0xE9], ByteOrder::BigEndian, Encoding::Latin1).unwrap(),
        Value::Char('é')
    );
}

#[test]
fn encoding_parses_aliases() {
    assert_eq!(Encoding::parse("utf-8").unwrap(), Encoding::Utf8);
    assert_eq!(Encoding::parse("utf8").unwrap(), Encoding::Utf8);
    assert_eq!(Encoding::parse("ascii").unwrap(), Encoding::Ascii);
    assert_eq!(Encoding::parse("latin-1").unwrap(), Encoding::Latin1);
    assert_eq!(Encoding::parse("iso-8859-1").unwrap(), Encoding::Latin1);

    let err = Encoding::parse("utf-16").unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::UnknownKind));
}

#[test]
fn latin1_round_trips_high_bytes() {
    let text = "café";
    let bytes = Encoding::Latin1.encode(text).unwrap();
    assert_eq!(bytes, vec![0x63, 0x61, 0x66, 0xE9]);
    assert_eq!(Encoding::Latin1.decode(&bytes).unwrap(), text);
}

#[test]
fn ascii_rejects_high_bytes_both_ways() {
    let err = Encoding::Ascii.encode("café").unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::CharEncoding));

    let err = Encoding::Ascii.decode(&[0x63, 0xE9]).unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::StringDecode));
}

#[test]
fn utf8_decode_rejects_invalid_sequences() {
    let err = Encoding::Utf8.decode(&[0xFF, 0xFE]).unwrap_err();
    assert_eq!(codec_kind(&err), Some(CodecErrorKind::StringDecode));
}
