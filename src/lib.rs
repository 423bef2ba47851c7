//! # recpack - Declarative Binary Record Codec
//!
//! recpack lets application code declare fixed-layout binary records in a
//! validated data-model vocabulary, then serialize instances to byte
//! strings matching a chosen host-compatible convention and parse byte
//! strings back into validated instances. It bridges a richly typed
//! runtime with embedded C/C++ peers that exchange flat records over
//! transports such as serial links.
//!
//! ## Quick Start
//!
//! ```rust
//! use recpack::{ByteOrder, FieldDecl, FieldKind, PrimKind, StructDef, record_values};
//!
//! # fn main() -> eyre::Result<()> {
//! let frame = StructDef::builder("Frame", ByteOrder::BigEndian)
//!     .field(FieldDecl::new("kind", FieldKind::Prim(PrimKind::U8)))
//!     .field(FieldDecl::new("seq", FieldKind::Prim(PrimKind::U32)))
//!     .field(FieldDecl::new("tag", FieldKind::Str).with_len(8))
//!     .build()?;
//!
//! let instance = frame.validate(record_values! {
//!     "kind" => 2u8,
//!     "seq" => 7u32,
//!     "tag" => "boot",
//! })?;
//!
//! let bytes = instance.pack()?;
//! assert_eq!(bytes.len(), frame.width());
//! assert_eq!(frame.unpack(&bytes)?, instance);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │    Record Types (StructDef builder)      │
//! ├──────────────────────────────────────────┤
//! │  Layout Compiler (descriptor schedule)   │
//! ├────────────────────┬─────────────────────┤
//! │  Packer / Unpacker │  Union Discriminator│
//! ├────────────────────┴─────────────────────┤
//! │   Constraint Validation (model layer)    │
//! ├──────────────────────────────────────────┤
//! │  Primitive Codec Table (byte order)      │
//! └──────────────────────────────────────────┘
//! ```
//!
//! A record type compiles exactly once, at `build()`: the layout compiler
//! walks the declared field list (base-type fields first), resolves each
//! declaration into a field descriptor, and caches the ordered schedule
//! with precomputed offsets and the total width. Packing iterates the
//! schedule over the instance's dump dictionary; unpacking iterates it
//! over the byte string and hands the raw dictionary to validation.
//!
//! ## Concurrency
//!
//! Single-threaded, non-suspending calls over immutable record types.
//! Descriptors are frozen at `build()` and shared via `Arc`; pack and
//! unpack allocate only local buffers, so any number of threads may work
//! with the same record type without coordination. There are no timeouts,
//! no cancellation and no backpressure — each call returns a result or an
//! error.
//!
//! ## Module Overview
//!
//! - [`types`]: runtime values and the primitive kind taxonomy
//! - [`encoding`]: byte-order modes, primitive codec table, string encodings
//! - [`schema`]: field declarations, record type builder, instances
//! - [`constraints`]: the validation layer between dictionaries and instances
//! - [`layout`]: field descriptors and the layout compiler
//! - [`records`]: packer, unpacker and the union discrimination engine
//! - [`error`]: the structural and validation error families

#[macro_use]
mod macros;

pub mod constraints;
pub mod encoding;
pub mod error;
pub mod layout;
pub mod records;
pub mod schema;
pub mod types;

pub use encoding::{ByteOrder, Encoding};
pub use error::{CodecError, CodecErrorKind, ValidationError};
pub use schema::{
    Constraint, FieldDecl, FieldKind, FillerPolicy, Instance, StructDef, StructDefBuilder,
};
pub use types::{ArrayContainer, PrimKind, Value, ValueMap};
