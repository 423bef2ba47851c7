//! # Convenience Macros
//!
//! ## record_values!
//!
//! Builds a [`ValueMap`](crate::types::ValueMap) from `name => value`
//! pairs, converting each value through `Value::from`:
//!
//! ```rust
//! use recpack::record_values;
//!
//! let values = record_values! {
//!     "seq" => 7u32,
//!     "tag" => "boot",
//!     "ratio" => 0.5f32,
//! };
//! assert_eq!(values.len(), 3);
//! ```

/// Builds a `ValueMap` from `name => value` pairs.
#[macro_export]
macro_rules! record_values {
    () => {
        $crate::types::ValueMap::default()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut values = $crate::types::ValueMap::default();
        $(
            values.insert(($name).into(), $crate::types::Value::from($value));
        )+
        values
    }};
}
