//! Runtime data model definitions.
//!
//! Types in `model` describe the listable entities: which fields exist, how
//! they map onto storage columns, what kind of literal each accepts, and
//! which ones may drive ordering. Filter compilation and the storage
//! adapters consult these descriptors; nothing here executes queries.
pub mod entity;
pub mod field;

#[cfg(test)]
mod tests;
