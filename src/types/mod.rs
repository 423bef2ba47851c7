//! # Type System
//!
//! The runtime type system for record values:
//!
//! - [`PrimKind`]: the primitive field taxonomy (fixed-width integers,
//!   floats, bool, single character) with per-kind widths and bounds
//! - [`Value`]: owned runtime representation of a field value
//! - [`ValueMap`]: the value dictionary exchanged between the codec and the
//!   model layer (field name → value)
//! - [`ArrayContainer`]: the container flavors an array field can declare

pub mod prim;
pub mod value;


pub use prim::PrimKind;
pub use value::{ArrayContainer, Value, ValueMap};
