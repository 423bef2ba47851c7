//! # Record Type Definitions
//!
//! `StructDef` is a record type: the ordered flattened field list, the
//! computed-value providers, the byte-order mode and the compiled layout.
//! It is built exactly once and immutable afterwards; the `Arc` allocation
//! is the type's identity. Concurrent packing and unpacking of instances of
//! the same type needs no coordination.
//!
//! Base-type flattening: each `extends` call prepends the base's declared
//! fields in the base's own declaration order, bases in `extends`-call
//! order, derived fields last. A field name repeated across bases is a
//! compile error rather than an ambiguous merge.

use std::fmt;
use std::sync::{Arc, Weak};

use eyre::Result;

use crate::encoding::ByteOrder;
use crate::layout::{self, Layout};
use crate::types::{PrimKind, Value, ValueMap};

use super::decl::FieldDecl;
use super::instance::Instance;

type ComputedFn = Arc<dyn Fn(&ValueMap) -> Value + Send + Sync>;

/// A computed-value provider: a named function of the instance's declared
/// values, yielding a value of a fixed primitive kind. Outlet fields pack
/// the provider's result; `dump` exposes it under the provider's name.
#[derive(Clone)]
pub struct ComputedDecl {
    name: String,
    kind: PrimKind,
    provider: ComputedFn,
}

impl ComputedDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PrimKind {
        self.kind
    }

    pub fn evaluate(&self, values: &ValueMap) -> Value {
        (self.provider)(values)
    }
}

impl fmt::Debug for ComputedDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedDecl")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

pub struct StructDef {
    name: String,
    fields: Vec<FieldDecl>,
    computed: Vec<ComputedDecl>,
    order: ByteOrder,
    layout: Layout,
    // back-reference to the owning Arc; record types only exist Arc-backed
    me: Weak<StructDef>,
}

impl fmt::Debug for StructDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructDef")
            .field("name", &self.name)
            .field("order", &self.order)
            .field("width", &self.layout.width())
            .finish_non_exhaustive()
    }
}

impl StructDef {
    pub fn builder(name: impl Into<String>, order: ByteOrder) -> StructDefBuilder {
        StructDefBuilder {
            name: name.into(),
            order,
            base_fields: Vec::new(),
            fields: Vec::new(),
            computed: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes needed to serialize any instance of this type.
    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Declared fields in flattened order (base-type fields first).
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn computed(&self) -> &[ComputedDecl] {
        &self.computed
    }

    pub fn computed_provider(&self, name: &str) -> Option<&ComputedDecl> {
        self.computed.iter().find(|c| c.name() == name)
    }

    /// The owning `Arc` of this record type.
    pub(crate) fn shared(&self) -> Arc<StructDef> {
        self.me.upgrade().expect("record types are always Arc-backed")
    }

    /// Validates a value dictionary into an instance of this type.
    /// The collaborator entry point used directly by application code and
    /// internally after every unpack.
    pub fn validate(&self, values: ValueMap) -> Result<Instance> {
        crate::constraints::Validator::new(self).validate(values)
    }

    /// Packs a validated instance into exactly `width()` bytes.
    pub fn pack(&self, instance: &Instance) -> Result<Vec<u8>> {
        crate::records::pack(self, instance)
    }

    /// Unpacks exactly `width()` bytes into a validated instance.
    pub fn unpack(&self, bytes: &[u8]) -> Result<Instance> {
        crate::records::unpack(self, bytes)
    }
}

pub struct StructDefBuilder {
    name: String,
    order: ByteOrder,
    base_fields: Vec<FieldDecl>,
    fields: Vec<FieldDecl>,
    computed: Vec<ComputedDecl>,
}

impl StructDefBuilder {
    /// Inherits the declared fields and computed providers of `base`.
    /// Bases flatten in call order, before this type's own fields.
    pub fn extends(mut self, base: &Arc<StructDef>) -> Self {
        self.base_fields.extend(base.fields.iter().cloned());
        self.computed.extend(base.computed.iter().cloned());
        self
    }

    pub fn field(mut self, decl: FieldDecl) -> Self {
        self.fields.push(decl);
        self
    }

    /// Registers a computed-value provider for outlet fields.
    pub fn computed(
        mut self,
        name: impl Into<String>,
        kind: PrimKind,
        provider: impl Fn(&ValueMap) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.computed.push(ComputedDecl {
            name: name.into(),
            kind,
            provider: Arc::new(provider),
        });
        self
    }

    /// Compiles the layout and freezes the record type. All compile-time
    /// diagnostics surface here and abort construction.
    pub fn build(self) -> Result<Arc<StructDef>> {
        let mut fields = self.base_fields;
        fields.extend(self.fields);
        let layout = layout::compile(&self.name, &fields, &self.computed, self.order)?;
        Ok(Arc::new_cyclic(|me| StructDef {
            name: self.name,
            fields,
            computed: self.computed,
            order: self.order,
            layout,
            me: me.clone(),
        }))
    }
}
