//! # Record Schema
//!
//! Declaration-time model of a record type:
//!
//! - [`FieldDecl`]: one declared field with its kind and annotations
//!   (length, encoding, filler policy, discriminator, constraints, default)
//! - [`StructDef`]: a record type — the ordered, flattened field list,
//!   computed-value providers, byte-order mode and the compiled layout.
//!   Built exactly once via [`StructDefBuilder`]; immutable afterwards.
//! - [`Instance`]: a validated instance of a record type
//!
//! ## Construction
//!
//! ```rust,ignore
//! use recpack::{ByteOrder, FieldDecl, FieldKind, PrimKind, StructDef};
//!
//! let msg = StructDef::builder("Telemetry", ByteOrder::BigEndian)
//!     .field(FieldDecl::new("kind", FieldKind::Prim(PrimKind::U8)).with_literal(2u8))
//!     .field(FieldDecl::new("seq", FieldKind::Prim(PrimKind::U32)))
//!     .field(FieldDecl::new("tag", FieldKind::Str).with_len(8))
//!     .build()?;
//! ```
//!
//! `build()` runs the layout compiler; every compile-time diagnostic
//! (missing lengths, outlet mismatches, duplicate names, ...) surfaces here
//! and aborts construction. The result is an `Arc<StructDef>` whose
//! allocation is the record type's identity: nesting, union membership and
//! instances all share it.

pub mod decl;
pub mod def;
pub mod instance;


pub use decl::{Constraint, FieldDecl, FieldKind, FillerPolicy};
pub use def::{ComputedDecl, StructDef, StructDefBuilder};
pub use instance::Instance;
