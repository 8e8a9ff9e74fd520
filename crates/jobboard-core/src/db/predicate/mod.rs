//! Predicate trees and the compiler that produces them.
//!
//! `compile` turns a validated FilterSet plus a scope constraint into a
//! `CompiledQuery`; `eval` interprets a tree against in-memory rows;
//! `fingerprint` hashes the compiled form for logging and caching.

mod ast;
mod compile;
mod eval;
mod fingerprint;
mod validate;

#[cfg(test)]
mod tests;

pub use ast::{LeafOp, LeafPredicate, Predicate};
pub use compile::{CompiledQuery, PredicateCompiler, SortDirective};
pub use eval::{FieldPresence, Row, eval};
pub use fingerprint::QueryFingerprint;
