//! # String Encodings
//!
//! Fixed-length string fields reserve bytes, not characters, so the codec
//! needs to map between `str` and bytes under a declared encoding. Three
//! encodings cover the embedded peers this crate talks to; the default is
//! UTF-8.
//!
//! Single-character (`char`) fields must encode to exactly one byte in the
//! record's encoding. Under UTF-8 that restricts them to ASCII.

use eyre::Result;

use crate::error::{codec_bail, CodecErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

static NAMES: phf::Map<&'static str, Encoding> = phf::phf_map! {
    "utf-8" => Encoding::Utf8,
    "utf8" => Encoding::Utf8,
    "ascii" => Encoding::Ascii,
    "us-ascii" => Encoding::Ascii,
    "latin-1" => Encoding::Latin1,
    "latin1" => Encoding::Latin1,
    "iso-8859-1" => Encoding::Latin1,
};

impl Encoding {
    pub fn parse(name: &str) -> Result<Self> {
        match NAMES.get(name) {
            Some(encoding) => Ok(*encoding),
            None => codec_bail!(
                CodecErrorKind::UnknownKind,
                "unknown string encoding '{}'",
                name
            ),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
        }
    }

    /// Encodes a string to bytes. A character outside the encoding's
    /// repertoire raises `CharEncoding` naming the offending character.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Ascii => {
                for c in text.chars() {
                    if !c.is_ascii() {
                        codec_bail!(
                            CodecErrorKind::CharEncoding,
                            "character '{}' is not representable in ascii",
                            c.escape_default()
                        );
                    }
                }
                Ok(text.as_bytes().to_vec())
            }
            Encoding::Latin1 => {
                let mut out = Vec::with_capacity(text.len());
                for c in text.chars() {
                    let code = c as u32;
                    if code > 0xFF {
                        codec_bail!(
                            CodecErrorKind::CharEncoding,
                            "character '{}' is not representable in latin-1",
                            c.escape_default()
                        );
                    }
                    out.push(code as u8);
                }
                Ok(out)
            }
        }
    }

    /// Decodes bytes to a string. Invalid sequences raise `StringDecode`.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Encoding::Utf8 => match std::str::from_utf8(bytes) {
                Ok(s) => Ok(s.to_string()),
                Err(e) => codec_bail!(CodecErrorKind::StringDecode, "invalid utf-8: {}", e),
            },
            Encoding::Ascii => {
                if let Some(b) = bytes.iter().find(|b| !b.is_ascii()) {
                    codec_bail!(
                        CodecErrorKind::StringDecode,
                        "byte 0x{:02x} is not ascii",
                        b
                    );
                }
                Ok(bytes.iter().map(|&b| b as char).collect())
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    /// Encodes a single character, which must occupy exactly one byte.
    pub fn encode_char(self, c: char) -> Result<u8> {
        let encoded = self.encode(&c.to_string())?;
        if encoded.len() != 1 {
            codec_bail!(
                CodecErrorKind::CharEncoding,
                "character '{}' occupies {} bytes in {}, expected 1",
                c.escape_default(),
                encoded.len(),
                self.name()
            );
        }
        Ok(encoded[0])
    }

    /// Decodes a single byte as a character.
    pub fn decode_char(self, byte: u8) -> Result<char> {
        match self {
            Encoding::Utf8 | Encoding::Ascii => {
                if !byte.is_ascii() {
                    codec_bail!(
                        CodecErrorKind::StringDecode,
                        "byte 0x{:02x} is not a single-byte character in {}",
                        byte,
                        self.name()
                    );
                }
                Ok(byte as char)
            }
            Encoding::Latin1 => Ok(byte as char),
        }
    }
}
