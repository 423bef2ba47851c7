//! # Field Declarations
//!
//! `FieldDecl` is one entry in a record type's declared field list: a name,
//! a declared kind, and the annotation vocabulary the layout compiler and
//! the validator consume. Annotations follow the builder style used across
//! this crate: construct with [`FieldDecl::new`], then chain `with_*`.
//!
//! Fields whose name starts with `_` are private to the model: they are
//! validated and carried on instances but the layout compiler skips them,
//! so they never occupy bytes.

use std::fmt;
use std::sync::Arc;

use crate::encoding::Encoding;
use crate::types::{ArrayContainer, PrimKind, Value};

use super::def::StructDef;

/// Declared kind of a field. Length-annotated kinds (`Str`, `Bytes`,
/// `Padding`, `Array`) take their byte or element count from the
/// `with_len` annotation.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Prim(PrimKind),
    Str,
    Bytes,
    Padding,
    Array {
        element: Box<FieldDecl>,
        container: ArrayContainer,
    },
    Nested(Arc<StructDef>),
    Union(Vec<Arc<StructDef>>),
    Outlet(PrimKind),
}

impl FieldKind {
    /// Array of `element` stored as a plain list.
    pub fn array(element: FieldDecl) -> Self {
        FieldKind::Array {
            element: Box::new(element),
            container: ArrayContainer::List,
        }
    }

    /// Array of `element` with an explicit container flavor.
    pub fn array_as(element: FieldDecl, container: ArrayContainer) -> Self {
        FieldKind::Array {
            element: Box::new(element),
            container,
        }
    }
}

/// How an array field fills missing trailing elements when packing, and
/// which trailing elements to trim when unpacking.
#[derive(Clone, Default)]
pub enum FillerPolicy {
    /// No filling: packing fewer than `count` elements is an error.
    #[default]
    None,
    /// Fill with the element kind's zero value.
    Default,
    /// Fill with a fixed value.
    Value(Value),
    /// Fill with a caller-supplied function of the element index.
    Custom(Arc<dyn Fn(usize) -> Value + Send + Sync>),
}

impl fmt::Debug for FillerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillerPolicy::None => write!(f, "None"),
            FillerPolicy::Default => write!(f, "Default"),
            FillerPolicy::Value(v) => write!(f, "Value({:?})", v),
            FillerPolicy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl FillerPolicy {
    pub fn is_none(&self) -> bool {
        matches!(self, FillerPolicy::None)
    }
}

/// Validation constraints enforced by the model layer. `Literal` and
/// `OneOf` additionally drive by-field union discrimination.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Inclusive integer bounds, tighter than the primitive kind's own.
    Range { min: i128, max: i128 },
    /// The field must equal this exact value.
    Literal(Value),
    /// The field must equal one of these values (enum-literal).
    OneOf(Vec<Value>),
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    name: String,
    kind: FieldKind,
    len: Option<usize>,
    encoding: Option<Encoding>,
    filler: FillerPolicy,
    retain_fillers: bool,
    discriminator: Option<String>,
    default: Option<Value>,
    constraints: Vec<Constraint>,
    strict_overflow: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            len: None,
            encoding: None,
            filler: FillerPolicy::None,
            retain_fillers: false,
            discriminator: None,
            default: None,
            constraints: Vec::new(),
            strict_overflow: false,
        }
    }

    /// Shorthand for an anonymous array element declaration.
    pub fn element(kind: FieldKind) -> Self {
        Self::new("", kind)
    }

    /// Byte count for `Str`/`Bytes`/`Padding`, element count for `Array`.
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }

    /// Overrides the string encoding (default utf-8).
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn with_filler(mut self, filler: FillerPolicy) -> Self {
        self.filler = filler;
        self
    }

    /// Keeps trailing filler elements when unpacking instead of trimming.
    pub fn retain_fillers(mut self) -> Self {
        self.retain_fillers = true;
        self
    }

    /// Selects by-field discrimination for a union field.
    pub fn with_discriminator(mut self, field: impl Into<String>) -> Self {
        self.discriminator = Some(field.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_range(mut self, min: i128, max: i128) -> Self {
        self.constraints.push(Constraint::Range { min, max });
        self
    }

    pub fn with_literal(mut self, value: impl Into<Value>) -> Self {
        self.constraints.push(Constraint::Literal(value.into()));
        self
    }

    pub fn with_one_of(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.constraints
            .push(Constraint::OneOf(values.into_iter().collect()));
        self
    }

    /// Strict string packing: overflow raises `BytesOverflow` instead of
    /// truncating silently.
    pub fn strict_overflow(mut self) -> Self {
        self.strict_overflow = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn len(&self) -> Option<usize> {
        self.len
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding.unwrap_or_default()
    }

    pub fn filler(&self) -> &FillerPolicy {
        &self.filler
    }

    pub fn retains_fillers(&self) -> bool {
        self.retain_fillers
    }

    pub fn discriminator(&self) -> Option<&str> {
        self.discriminator.as_deref()
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_strict_overflow(&self) -> bool {
        self.strict_overflow
    }

    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }

    /// The literal/one-of constraint used for by-field union admission,
    /// if the field declares one.
    pub fn admission(&self) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|c| matches!(c, Constraint::Literal(_) | Constraint::OneOf(_)))
    }
}
