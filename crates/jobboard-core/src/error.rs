use crate::db::{AuthorizationError, StorageError, ValidationError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// ListingError
///
/// Every failure a listing request can surface. Each variant keeps its
/// layer error intact so callers can map the class to a transport outcome
/// (400 / 401-403 / 5xx equivalents).
///

#[derive(Debug, ThisError)]
pub enum ListingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ListingError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Validation,
            Self::Authorization(_) => ErrorClass::Authorization,
            Self::Storage(_) => ErrorClass::Storage,
        }
    }

    /// Stable machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(err) => err.kind(),
            Self::Authorization(err) => err.kind(),
            Self::Storage(err) => err.kind(),
        }
    }

    /// Human-readable detail string.
    #[must_use]
    pub fn detail(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.class(), self.kind(), self)
    }
}

///
/// ErrorClass
/// Coarse taxonomy used to pick the caller-facing outcome.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Validation,
    Authorization,
    Storage,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::Storage => "storage",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorKind
/// Stable machine-readable error kinds. Labels never change once published.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    // validation
    UnknownField,
    UnknownSortField,
    InvalidOperator,
    InvalidLiteral,
    InvalidRange,
    MissingRangeBound,
    InvalidLimit,
    InvalidSort,

    // authorization
    MissingIdentity,
    Forbidden,
    InvalidScope,

    // storage
    StorageTimeout,
    StorageUnavailable,
    StorageInternal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownField => "UnknownField",
            Self::UnknownSortField => "UnknownSortField",
            Self::InvalidOperator => "InvalidOperator",
            Self::InvalidLiteral => "InvalidLiteral",
            Self::InvalidRange => "InvalidRange",
            Self::MissingRangeBound => "MissingRangeBound",
            Self::InvalidLimit => "InvalidLimit",
            Self::InvalidSort => "InvalidSort",
            Self::MissingIdentity => "MissingIdentity",
            Self::Forbidden => "Forbidden",
            Self::InvalidScope => "InvalidScope",
            Self::StorageTimeout => "StorageTimeout",
            Self::StorageUnavailable => "StorageUnavailable",
            Self::StorageInternal => "StorageInternal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
