//! Traits implemented by listable record types.

use crate::{model::entity::EntityModel, value::Value};

///
/// FieldValues
///
/// Read-only access to a record's fields by their filter-facing name.
/// `None` means the record has no such field; a present-but-empty field is
/// `Some(Value::Null)`.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// Listable
/// A record type bound to the static model describing it.
///

pub trait Listable: FieldValues {
    const MODEL: &'static EntityModel;
}
