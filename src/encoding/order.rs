//! # Byte-Order Modes
//!
//! A record type chooses one of five modes at declaration time:
//!
//! | Mode | Endianness | Implicit padding |
//! |------|------------|------------------|
//! | `native-aligned` | host | host ABI alignment between fields |
//! | `native` | host | none |
//! | `little-endian` | little | none |
//! | `big-endian` | big | none |
//! | `network` | big (synonym) | none |
//!
//! Only `native-aligned` makes a record's width host-dependent; it is kept
//! for talking to C peers that exchange unpacked structs.

use eyre::Result;

use crate::error::{codec_bail, CodecErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    NativeAligned,
    Native,
    LittleEndian,
    #[default]
    BigEndian,
    Network,
}

static NAMES: phf::Map<&'static str, ByteOrder> = phf::phf_map! {
    "native-aligned" => ByteOrder::NativeAligned,
    "native" => ByteOrder::Native,
    "little-endian" => ByteOrder::LittleEndian,
    "big-endian" => ByteOrder::BigEndian,
    "network" => ByteOrder::Network,
};

impl ByteOrder {
    pub fn parse(name: &str) -> Result<Self> {
        match NAMES.get(name) {
            Some(order) => Ok(*order),
            None => codec_bail!(CodecErrorKind::UnknownKind, "unknown byte order '{}'", name),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ByteOrder::NativeAligned => "native-aligned",
            ByteOrder::Native => "native",
            ByteOrder::LittleEndian => "little-endian",
            ByteOrder::BigEndian => "big-endian",
            ByteOrder::Network => "network",
        }
    }

    /// Resolved endianness for multi-byte values. The two native modes
    /// follow the host.
    pub fn is_little(self) -> bool {
        match self {
            ByteOrder::LittleEndian => true,
            ByteOrder::BigEndian | ByteOrder::Network => false,
            ByteOrder::Native | ByteOrder::NativeAligned => cfg!(target_endian = "little"),
        }
    }

    /// Whether the layout compiler inserts host-ABI alignment padding.
    pub fn aligned(self) -> bool {
        matches!(self, ByteOrder::NativeAligned)
    }
}
