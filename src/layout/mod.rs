//! # Layout Compilation
//!
//! The layout compiler runs once per record type, at `StructDef::build()`
//! time. It walks the flattened declaration list and produces the ordered
//! schedule of binary operations the packer and unpacker execute:
//!
//! - [`FieldDescriptor`]: tagged variant describing how one field's bytes
//!   are produced and consumed
//! - [`FieldSlot`]: a scheduled descriptor with its precomputed byte offset
//! - [`Layout`]: the frozen schedule plus total width, alignment and
//!   byte-order mode
//!
//! Precomputing offsets at compile time means pack and unpack never walk a
//! running cursor: each field reads or writes `buf[offset .. offset+width]`
//! directly. For every mode except `native-aligned` the offsets are simply
//! the running sum of widths; `native-aligned` rounds each offset up to the
//! field's natural alignment and the total width up to the layout
//! alignment, mirroring the host C ABI.
//!
//! The compiler is pure and deterministic. Nothing in a `Layout` is mutated
//! after compile, so layouts are shared freely across threads.

pub mod compile;
pub mod descriptor;


pub use compile::compile;
pub use descriptor::{Discriminator, FieldDescriptor, FieldSlot, Layout};
