//! Deterministic hash encoding of compiled queries.
//!
//! Two compiles with equal (entity, predicate, sort) produce byte-identical
//! hash streams, so the digest doubles as an equality witness in logs and
//! cache keys. The page window is not part of the digest.

use crate::{
    db::predicate::{LeafPredicate, Predicate, SortDirective},
    value::Value,
};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// QueryFingerprint
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct QueryFingerprint([u8; 32]);

impl QueryFingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            use std::fmt::Write as _;
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl fmt::Display for QueryFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

pub(crate) fn fingerprint(
    entity: &str,
    root: &Predicate,
    sort: &SortDirective,
) -> QueryFingerprint {
    let mut hasher = Sha256::new();
    hasher.update(b"queryfp:v1");
    write_str(&mut hasher, entity);
    hash_predicate(&mut hasher, root);
    hash_sort(&mut hasher, sort);

    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    QueryFingerprint(out)
}

fn hash_predicate(hasher: &mut Sha256, predicate: &Predicate) {
    match predicate {
        Predicate::True => write_tag(hasher, 0x01),
        Predicate::False => write_tag(hasher, 0x02),
        Predicate::And(children) => {
            write_tag(hasher, 0x03);
            hash_children(hasher, children);
        }
        Predicate::Or(children) => {
            write_tag(hasher, 0x04);
            hash_children(hasher, children);
        }
        Predicate::Leaf(leaf) => {
            write_tag(hasher, 0x05);
            hash_leaf(hasher, leaf);
        }
    }
}

fn hash_children(hasher: &mut Sha256, children: &[Predicate]) {
    write_len(hasher, children.len());
    for child in children {
        hash_predicate(hasher, child);
    }
}

fn hash_leaf(hasher: &mut Sha256, leaf: &LeafPredicate) {
    write_str(hasher, &leaf.field);
    write_tag(hasher, leaf.op.tag());
    write_len(hasher, leaf.values.len());
    for value in &leaf.values {
        write_value(hasher, value);
    }
}

fn hash_sort(hasher: &mut Sha256, sort: &SortDirective) {
    write_tag(hasher, 0x20);
    write_len(hasher, sort.keys().len());
    for key in sort.keys() {
        write_str(hasher, &key.field);
        write_tag(hasher, key.direction.tag());
    }
}

// Values are framed by their rank; numeric families carry an extra sign tag
// so Int(5) and Uint(5) encode differently.
fn write_value(hasher: &mut Sha256, value: &Value) {
    write_tag(hasher, value.rank());
    match value {
        Value::Null => {}
        Value::Bool(b) => write_tag(hasher, u8::from(*b)),
        Value::Int(v) => {
            write_tag(hasher, 0x01);
            hasher.update(v.to_be_bytes());
        }
        Value::Uint(v) => {
            write_tag(hasher, 0x02);
            hasher.update(v.to_be_bytes());
        }
        Value::Text(s) | Value::Enum(s) => write_str(hasher, s),
        Value::Timestamp(ts) => hasher.update(ts.as_seconds().to_be_bytes()),
        Value::Ulid(id) => hasher.update(id.to_bytes()),
        Value::List(items) => {
            write_len(hasher, items.len());
            for item in items {
                write_value(hasher, item);
            }
        }
    }
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

fn write_len(hasher: &mut Sha256, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
}

fn write_str(hasher: &mut Sha256, value: &str) {
    write_len(hasher, value.len());
    hasher.update(value.as_bytes());
}
