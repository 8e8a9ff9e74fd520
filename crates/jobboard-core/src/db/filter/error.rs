use crate::{
    db::filter::{Operator, RangeBound},
    error::ErrorKind,
    value::Value,
};
use thiserror::Error as ThisError;

///
/// ValidationError
///
/// Caller input is malformed. Raised while building or compiling a
/// FilterSet, always before any storage call.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("unknown filter field '{field}' on {entity}")]
    UnknownField { entity: &'static str, field: String },

    #[error("'{field}' is not a sortable field of {entity}")]
    UnknownSortField { entity: &'static str, field: String },

    #[error("operator {op} is not valid for field '{field}' of kind {kind}")]
    InvalidOperator {
        field: String,
        op: Operator,
        kind: String,
    },

    #[error("invalid literal for field '{field}': {message}")]
    InvalidLiteral { field: String, message: String },

    #[error("range on '{field}' has lower bound {lower:?} above upper bound {upper:?}")]
    InvalidRange {
        field: String,
        lower: Value,
        upper: Value,
    },

    #[error("range on '{field}' requires both bounds; {bound} bound is missing")]
    MissingRangeBound { field: String, bound: RangeBound },

    #[error("page limit must be positive, got {limit}")]
    InvalidLimit { limit: i64 },

    #[error("invalid sort key '{input}': {message}")]
    InvalidSort { input: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid_literal(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            field: field.to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownField { .. } => ErrorKind::UnknownField,
            Self::UnknownSortField { .. } => ErrorKind::UnknownSortField,
            Self::InvalidOperator { .. } => ErrorKind::InvalidOperator,
            Self::InvalidLiteral { .. } => ErrorKind::InvalidLiteral,
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::MissingRangeBound { .. } => ErrorKind::MissingRangeBound,
            Self::InvalidLimit { .. } => ErrorKind::InvalidLimit,
            Self::InvalidSort { .. } => ErrorKind::InvalidSort,
        }
    }
}
