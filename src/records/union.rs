//! # Union Discrimination Engine
//!
//! Selects which member record type a union byte region represents during
//! unpack. Packing never comes here — it dispatches on the instance's
//! runtime record type.
//!
//! Two strategies:
//!
//! - **Left-to-right** (default): members are tried in declaration order.
//!   A trial takes the first `member.width()` bytes of the region, unpacks
//!   them structurally, then validates. The first member to pass both
//!   stages wins. Failures of either family disqualify the member and are
//!   accumulated; if every member fails, `UnionNoMatch` reports all of
//!   them.
//! - **By-field**: after a structural unpack of each member in turn, the
//!   named discriminator field's raw value is tested against that member's
//!   literal/one-of constraint. The first member whose constraint admits
//!   the value is the match; its validation result is returned as-is, so a
//!   validation failure after a discriminator match propagates instead of
//!   falling through to later members.
//!
//! Either way the engine performs at most one structural unpack per member
//! per call, never inspects bytes beyond a member's own width for that
//! member, and never mutates the region.

use std::sync::Arc;

use eyre::Result;
use smallvec::SmallVec;

use crate::error::{codec_bail, CodecErrorKind};
use crate::layout::Discriminator;
use crate::schema::{Constraint, Instance, StructDef};

use super::unpack::{unpack, unpack_raw};

pub(crate) fn discriminate(
    members: &[Arc<StructDef>],
    discriminator: &Discriminator,
    region: &[u8],
) -> Result<Instance> {
    match discriminator {
        Discriminator::LeftToRight => left_to_right(members, region),
        Discriminator::ByField(field) => by_field(members, field, region),
    }
}

fn left_to_right(members: &[Arc<StructDef>], region: &[u8]) -> Result<Instance> {
    let mut failures: SmallVec<[String; 4]> = SmallVec::new();
    for member in members {
        match unpack(member, &region[..member.width()]) {
            Ok(instance) => return Ok(instance),
            Err(e) => failures.push(format!("{}: {:#}", member.name(), e)),
        }
    }
    codec_bail!(
        CodecErrorKind::UnionNoMatch,
        "no union member matched: {}",
        failures.join("; ")
    )
}

fn by_field(members: &[Arc<StructDef>], field: &str, region: &[u8]) -> Result<Instance> {
    let mut failures: SmallVec<[String; 4]> = SmallVec::new();
    for member in members {
        let raw = match unpack_raw(member, &region[..member.width()]) {
            Ok(raw) => raw,
            Err(e) => {
                failures.push(format!("{}: {:#}", member.name(), e));
                continue;
            }
        };
        let raw_value = match raw.get(field) {
            Some(value) => value,
            None => {
                failures.push(format!(
                    "{}: discriminator field '{}' decoded no value",
                    member.name(),
                    field
                ));
                continue;
            }
        };
        let decl = member
            .field(field)
            .expect("layout compiler verified the discriminator field");
        let admitted = match decl.admission().expect("layout compiler verified the constraint") {
            Constraint::Literal(expected) => raw_value.loose_eq(expected),
            Constraint::OneOf(admitted) => admitted.iter().any(|a| raw_value.loose_eq(a)),
            Constraint::Range { .. } => unreachable!("admission is literal or one-of"),
        };
        if admitted {
            return member.validate(raw);
        }
        failures.push(format!(
            "{}: discriminator value {:?} not admitted",
            member.name(),
            raw_value
        ));
    }
    codec_bail!(
        CodecErrorKind::UnionNoMatch,
        "no union member admitted the discriminator: {}",
        failures.join("; ")
    )
}
