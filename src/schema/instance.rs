//! # Validated Instances
//!
//! An `Instance` is a value dictionary that has passed validation against
//! its record type. Instances are the only input the packer accepts and the
//! only output the unpacker produces, so every byte string the codec emits
//! or admits corresponds to a constraint-checked record.

use std::cmp::Ordering;
use std::sync::Arc;

use eyre::Result;

use crate::types::{Value, ValueMap};

use super::def::StructDef;

#[derive(Debug, Clone)]
pub struct Instance {
    def: Arc<StructDef>,
    values: ValueMap,
}

impl Instance {
    /// Crate-internal: only the validator constructs instances.
    pub(crate) fn new(def: Arc<StructDef>, values: ValueMap) -> Self {
        Self { def, values }
    }

    pub fn def(&self) -> &Arc<StructDef> {
        &self.def
    }

    /// Whether this instance belongs to the given record type.
    pub fn is(&self, def: &Arc<StructDef>) -> bool {
        Arc::ptr_eq(&self.def, def)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// The collaborator's dump entry point: declared field values plus
    /// computed values keyed under their provider names. Computed entries
    /// are re-evaluated on every call, so outlet bytes always reflect the
    /// current declared values.
    pub fn dump(&self) -> ValueMap {
        let mut out = self.values.clone();
        for computed in self.def.computed() {
            out.insert(computed.name().to_string(), computed.evaluate(&self.values));
        }
        out
    }

    /// Packs this instance into exactly `def().width()` bytes.
    pub fn pack(&self) -> Result<Vec<u8>> {
        self.def.pack(self)
    }

    /// Deterministic order for set-container normalization: record type
    /// name first, then field values in declared order.
    pub(crate) fn total_cmp(&self, other: &Instance) -> Ordering {
        let name = self.def.name().cmp(other.def.name());
        if name != Ordering::Equal {
            return name;
        }
        for field in self.def.fields() {
            let a = self.values.get(field.name());
            let b = other.values.get(field.name());
            let ord = match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// Instances are equal when they share a record type and their declared
/// values are equal.
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.def, &other.def) && self.values == other.values
    }
}
