use crate::{
    db::predicate::{Predicate, SortDirective},
    error::ErrorKind,
    model::entity::EntityModel,
};
use thiserror::Error as ThisError;

///
/// StorageError
///
/// Failures reported by a storage adapter. Propagated unchanged to the
/// caller; the executor never retries or returns partial pages.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StorageError {
    #[error("storage timed out: {message}")]
    Timeout { message: String },

    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("storage internal error: {message}")]
    Internal { message: String },
}

impl StorageError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout { .. } => ErrorKind::StorageTimeout,
            Self::Unavailable { .. } => ErrorKind::StorageUnavailable,
            Self::Internal { .. } => ErrorKind::StorageInternal,
        }
    }
}

///
/// StoragePage
/// One window of rows plus the count of every row matching the predicate.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoragePage<R> {
    pub rows: Vec<R>,
    pub total_count: u64,
}

impl<R> StoragePage<R> {
    #[must_use]
    pub const fn new(rows: Vec<R>, total_count: u64) -> Self {
        Self { rows, total_count }
    }
}

///
/// StorageExecutor
///
/// Boundary to the backing store. An adapter must evaluate the predicate
/// exactly as given (scope included), order by every sort key, and report
/// `total_count` over the whole predicate, ignoring the window. Constant
/// trees (`True`/`False`) are valid input.
///

pub trait StorageExecutor: Send + Sync {
    type Row;

    fn fetch(
        &self,
        model: &'static EntityModel,
        predicate: &Predicate,
        sort: &SortDirective,
        offset: u64,
        limit: u32,
    ) -> Result<StoragePage<Self::Row>, StorageError>;
}
