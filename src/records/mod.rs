//! # Record Packing and Unpacking
//!
//! The execution side of the codec. The layout compiler has already turned
//! every record type into a schedule of descriptors with precomputed
//! offsets; this module walks that schedule:
//!
//! - `pack`: validated instance → dump dictionary → byte string of exactly
//!   the type's width
//! - `unpack`: byte string of exactly the type's width → raw dictionary →
//!   validated instance
//! - `union`: the discrimination engine selecting which union member a
//!   byte region represents
//!
//! ## Data flow
//!
//! ```text
//! pack:   Instance ──dump()──▶ ValueMap ──schedule──▶ Vec<u8>
//! unpack: &[u8] ──schedule──▶ ValueMap ──validate()──▶ Instance
//! ```
//!
//! All operations are synchronous and side-effect-free: they allocate one
//! exact-width buffer (pack) or one dictionary (unpack) and touch no shared
//! state, so concurrent calls over the same record type need no
//! coordination.

mod pack;
mod union;
mod unpack;


pub use pack::pack;
pub use unpack::unpack;
pub(crate) use unpack::unpack_raw;
