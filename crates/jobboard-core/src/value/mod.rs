mod timestamp;


use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ulid::Ulid;

// re-exports
pub use timestamp::Timestamp;

///
/// Value
///
/// Literal carried by criteria, predicate leaves, and storage rows.
///
/// Null → the field holds no value (SQL NULL). Inside a RANGE criterion it
/// marks an open bound.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
    Enum(String),
    Timestamp(Timestamp),
    Ulid(Ulid),
    List(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Uint(_))
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Enum(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Stable variant rank used by the canonical order and tree encoding.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Uint(_) => 2,
            Self::Text(_) => 3,
            Self::Enum(_) => 4,
            Self::Timestamp(_) => 5,
            Self::Ulid(_) => 6,
            Self::List(_) => 7,
        }
    }

    /// Short label naming the value family, for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Text(_) => "text",
            Self::Enum(_) => "enum",
            Self::Timestamp(_) => "timestamp",
            Self::Ulid(_) => "ulid",
            Self::List(_) => "list",
        }
    }

    ///
    /// Strict comparison used by predicate evaluation.
    ///
    /// Defined only within one value family (Int and Uint share the numeric
    /// family). Null, Bool and List have no ordering here and return `None`.
    ///
    #[must_use]
    pub fn cmp_strict(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(_) | Self::Uint(_), Self::Int(_) | Self::Uint(_)) => {
                Some(numeric_cmp(self, other))
            }
            (Self::Text(a), Self::Text(b)) | (Self::Enum(a), Self::Enum(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            (Self::Ulid(a), Self::Ulid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Strict equality: same family and equal payload; Null never equals.
    #[must_use]
    pub fn eq_strict(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, _) | (_, Self::Null) => false,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_strict(y))
            }
            _ => self.cmp_strict(other) == Some(Ordering::Equal),
        }
    }

    ///
    /// Total order across every value.
    ///
    /// Orders by variant rank first, then by payload. Numeric values compare
    /// by magnitude regardless of signedness. Used for sorting rows and for
    /// deduplicating literal sets deterministically.
    ///
    #[must_use]
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        let rank = self.rank().cmp(&other.rank());
        if rank != Ordering::Equal {
            return rank;
        }

        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ord = x.canonical_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.cmp_strict(other).unwrap_or(Ordering::Equal),
        }
    }

    /// Case-insensitive substring test; `None` when either side is not text.
    #[must_use]
    pub fn text_contains_ci(&self, needle: &Self) -> Option<bool> {
        let (Self::Text(haystack), Self::Text(needle)) = (self, needle) else {
            return None;
        };

        Some(fold_case(haystack).contains(&fold_case(needle)))
    }

    /// Element membership on list values. Text elements match case-insensitively.
    #[must_use]
    pub fn list_contains(&self, needle: &Self) -> bool {
        let Self::List(items) = self else {
            return false;
        };

        items.iter().any(|item| match (item, needle) {
            (Self::Text(a), Self::Text(b)) => fold_case(a) == fold_case(b),
            _ => item.eq_strict(needle),
        })
    }
}

/// The single case folding used by text matching (Unicode lowercase, the
/// same mapping as PostgreSQL `lower()` and `ILIKE`).
#[must_use]
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

fn numeric_cmp(left: &Value, right: &Value) -> Ordering {
    let widen = |value: &Value| match value {
        Value::Int(v) => i128::from(*v),
        Value::Uint(v) => i128::from(*v),
        _ => 0,
    };

    widen(left).cmp(&widen(right))
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Ulid> for Value {
    fn from(value: Ulid) -> Self {
        Self::Ulid(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}
