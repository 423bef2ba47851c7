//! # Constraint Validation
//!
//! The model layer's entry point from dictionaries to instances. Every
//! unpacked byte string and every application-supplied value dictionary
//! passes through [`Validator::validate`] before it becomes an
//! [`Instance`]; the packer only ever sees validated instances.
//!
//! ## Validation order
//!
//! 1. Apply declared defaults for absent fields
//! 2. Discard entries for padding fields, outlet fields and computed
//!    provider names (those never carry caller data)
//! 3. Reject keys that match no declared field
//! 4. Per field: kind check with integer-variant coercion, then declared
//!    constraints (range, literal, one-of)
//!
//! ## Kind coercion
//!
//! Callers and the unpacker may hand integers as either `UInt` or `Int`;
//! validation normalizes to `UInt` for unsigned kinds and `Int` for signed
//! kinds, rejecting values outside the kind's range (a `uint8` field
//! rejects 278 here, before the packer ever runs). Floats accept either
//! integer variant. A one-character `Text` is accepted for a `char` field.
//!
//! For array fields the declared constraints apply per element, which is
//! how enum-valued element types are expressed. Set containers are
//! normalized (sorted, deduplicated) during validation so that packing
//! order is deterministic per instance.
//!
//! ## Error messages
//!
//! All failures are [`ValidationError`]s naming the field and the
//! offending value, e.g. `validation failed on field 'n': value 278 out of
//! range for uint8`.

use eyre::Result;

use crate::error::ValidationError;
use crate::schema::{Constraint, FieldDecl, FieldKind, Instance, StructDef};
use crate::types::{PrimKind, Value, ValueMap};

pub struct Validator<'a> {
    def: &'a StructDef,
}

impl<'a> Validator<'a> {
    pub fn new(def: &'a StructDef) -> Self {
        Self { def }
    }

    pub fn validate(&self, mut values: ValueMap) -> Result<Instance> {
        self.apply_defaults(&mut values);
        self.discard_valueless(&mut values);
        self.reject_unknown(&values)?;

        let mut checked = ValueMap::with_capacity(values.len());
        for decl in self.def.fields() {
            if is_valueless(decl) {
                continue;
            }
            let value = match values.remove(decl.name()) {
                Some(value) => value,
                None => {
                    return Err(ValidationError::new(
                        decl.name(),
                        format!("required by '{}' but not provided", self.def.name()),
                    )
                    .into())
                }
            };
            let normalized = check_field(decl, value)?;
            checked.insert(decl.name().to_string(), normalized);
        }

        Ok(Instance::new(self.def.shared(), checked))
    }

    fn apply_defaults(&self, values: &mut ValueMap) {
        for decl in self.def.fields() {
            if let Some(default) = decl.default() {
                if !values.contains_key(decl.name()) {
                    values.insert(decl.name().to_string(), default.clone());
                }
            }
        }
    }

    /// Padding and outlet fields never carry caller data; computed entries
    /// (as produced by `dump`) are recomputed rather than trusted. All
    /// three are discarded so a dumped dictionary validates unchanged.
    fn discard_valueless(&self, values: &mut ValueMap) {
        for decl in self.def.fields() {
            if is_valueless(decl) {
                values.remove(decl.name());
            }
        }
        for computed in self.def.computed() {
            values.remove(computed.name());
        }
    }

    fn reject_unknown(&self, values: &ValueMap) -> Result<()> {
        for key in values.keys() {
            if self.def.field(key).is_none() {
                return Err(ValidationError::new(
                    key.clone(),
                    format!("'{}' declares no such field", self.def.name()),
                )
                .into());
            }
        }
        Ok(())
    }
}

fn is_valueless(decl: &FieldDecl) -> bool {
    matches!(decl.kind(), FieldKind::Padding | FieldKind::Outlet(_))
}

fn kind_error(field: &str, expected: &str, got: &Value) -> ValidationError {
    ValidationError::new(
        field,
        format!("expected {}, got {}", expected, got.kind_name()),
    )
}

/// Kind-checks and normalizes one field value, then applies the declared
/// constraints. Array constraints apply per element.
fn check_field(decl: &FieldDecl, value: Value) -> Result<Value> {
    let normalized = match decl.kind() {
        FieldKind::Prim(kind) => check_prim(decl.name(), *kind, value)?,
        FieldKind::Str => match value {
            Value::Text(s) => Value::Text(s),
            other => return Err(kind_error(decl.name(), "a string", &other).into()),
        },
        FieldKind::Bytes => match value {
            Value::Bytes(b) => Value::Bytes(b),
            other => return Err(kind_error(decl.name(), "raw bytes", &other).into()),
        },
        FieldKind::Array { element, container } => {
            let items = match value {
                Value::List(items) => items,
                other => return Err(kind_error(decl.name(), "a list", &other).into()),
            };
            let mut checked = Vec::with_capacity(items.len());
            for item in items {
                let item = check_field(element, item)?;
                apply_constraints(decl.name(), decl.constraints(), &item)?;
                checked.push(item);
            }
            if matches!(container, crate::types::ArrayContainer::Set) {
                checked.sort_by(|a, b| a.total_cmp(b));
                checked.dedup_by(|a, b| a.loose_eq(b));
            }
            return Ok(Value::List(checked));
        }
        FieldKind::Nested(def) => match value {
            Value::Struct(instance) if instance.is(def) => Value::Struct(instance),
            Value::Struct(instance) => {
                return Err(ValidationError::new(
                    decl.name(),
                    format!(
                        "expected an instance of '{}', got '{}'",
                        def.name(),
                        instance.def().name()
                    ),
                )
                .into())
            }
            other => return Err(kind_error(decl.name(), "a nested record", &other).into()),
        },
        FieldKind::Union(members) => match value {
            Value::Struct(instance) if members.iter().any(|m| instance.is(m)) => {
                Value::Struct(instance)
            }
            Value::Struct(instance) => {
                return Err(ValidationError::new(
                    decl.name(),
                    format!(
                        "'{}' is not a member of this union",
                        instance.def().name()
                    ),
                )
                .into())
            }
            other => return Err(kind_error(decl.name(), "a union member record", &other).into()),
        },
        FieldKind::Padding | FieldKind::Outlet(_) => unreachable!("valueless kinds are discarded"),
    };
    apply_constraints(decl.name(), decl.constraints(), &normalized)?;
    Ok(normalized)
}

fn check_prim(field: &str, kind: PrimKind, value: Value) -> Result<Value> {
    if kind.is_integer() {
        let wide = match value.as_int_wide() {
            Some(wide) => wide,
            None => return Err(kind_error(field, "an integer", &value).into()),
        };
        let (min, max) = kind.bounds().expect("integer kind has bounds");
        if wide < min || wide > max {
            return Err(ValidationError::new(
                field,
                format!("value {} out of range for {}", wide, kind.name()),
            )
            .into());
        }
        return Ok(if kind.is_signed() {
            Value::Int(wide as i64)
        } else {
            Value::UInt(wide as u64)
        });
    }
    if kind.is_float() {
        return match value.as_f64() {
            Some(f) => Ok(Value::Float(f)),
            None => Err(kind_error(field, "a number", &value).into()),
        };
    }
    match kind {
        PrimKind::Bool => match value {
            Value::Bool(b) => Ok(Value::Bool(b)),
            other => Err(kind_error(field, "a bool", &other).into()),
        },
        PrimKind::Char => match value {
            Value::Char(c) => Ok(Value::Char(c)),
            Value::Text(s) if s.chars().count() == 1 => {
                Ok(Value::Char(s.chars().next().expect("one char")))
            }
            other => Err(kind_error(field, "a single character", &other).into()),
        },
        _ => unreachable!("integer and float kinds handled above"),
    }
}

fn apply_constraints(field: &str, constraints: &[Constraint], value: &Value) -> Result<()> {
    for constraint in constraints {
        match constraint {
            Constraint::Range { min, max } => {
                let wide = match value.as_int_wide() {
                    Some(wide) => wide,
                    None => {
                        return Err(ValidationError::new(
                            field,
                            format!("range constraint needs an integer, got {}", value.kind_name()),
                        )
                        .into())
                    }
                };
                if wide < *min || wide > *max {
                    return Err(ValidationError::new(
                        field,
                        format!("value {} outside declared range {}..={}", wide, min, max),
                    )
                    .into());
                }
            }
            Constraint::Literal(expected) => {
                if !value.loose_eq(expected) {
                    return Err(ValidationError::new(
                        field,
                        format!("expected literal {:?}, got {:?}", expected, value),
                    )
                    .into());
                }
            }
            Constraint::OneOf(admitted) => {
                if !admitted.iter().any(|a| value.loose_eq(a)) {
                    return Err(ValidationError::new(
                        field,
                        format!("value {:?} is not one of the admitted values", value),
                    )
                    .into());
                }
            }
        }
    }
    Ok(())
}
