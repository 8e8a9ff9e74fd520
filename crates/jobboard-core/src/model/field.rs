use crate::value::Value;
use std::fmt;

///
/// FieldModel
/// Runtime field metadata used by validation, sorting, and adapters.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as used in criteria and sort keys.
    pub name: &'static str,
    /// Storage column name.
    pub column: &'static str,
    /// Literal shape accepted by criteria on this field.
    pub kind: FieldKind,
    /// Whether the field may appear in a sort directive.
    pub sortable: bool,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            column,
            kind,
            sortable: false,
        }
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

///
/// FieldKind
///
/// Lossy projection of a record field's type onto `Value` families.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Int,
    Uint,
    Text,
    Enum,
    Timestamp,
    Ulid,
    List(&'static Self),
}

impl FieldKind {
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Bound comparisons (RANGE, GTE, LTE, ORDER BY) are meaningful.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Uint | Self::Text | Self::Timestamp | Self::Ulid
        )
    }

    /// Element kind for list fields, the kind itself otherwise.
    #[must_use]
    pub const fn element(&self) -> &Self {
        match self {
            Self::List(inner) => *inner,
            other => other,
        }
    }

    /// Whether a scalar literal fits this (scalar) kind.
    #[must_use]
    pub const fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Bool, Value::Bool(_))
                | (Self::Int | Self::Uint, Value::Int(_) | Value::Uint(_))
                | (Self::Text, Value::Text(_))
                | (Self::Enum, Value::Enum(_))
                | (Self::Timestamp, Value::Timestamp(_))
                | (Self::Ulid, Value::Ulid(_))
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Uint => write!(f, "uint"),
            Self::Text => write!(f, "text"),
            Self::Enum => write!(f, "enum"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Ulid => write!(f, "ulid"),
            Self::List(inner) => write!(f, "list<{inner}>"),
        }
    }
}
