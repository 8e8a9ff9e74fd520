//! Core listing engine for the job board: values, entity models, filter
//! composition, predicate compilation, scope guards and paged execution.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Page size used when a request carries no limit.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Largest page size served; larger requests are clamped, not rejected.
pub const MAX_PAGE_LIMIT: u32 = 100;

///
/// Prelude
///
/// Vocabulary needed to declare listable records and listing endpoints.
///

pub mod prelude {
    pub use crate::{
        config::ListingConfig,
        db::{
            Criterion, FilterInput, FilterSet, ListingTarget, Page, PageRequest, Principal,
            RangeBounds, RangeInput, Role, ScopeContext, ScopeGuard, SortSpec, ValidationError,
            compile_and_execute,
        },
        error::ListingError,
        model::{
            entity::EntityModel,
            field::{FieldKind, FieldModel},
        },
        traits::{FieldValues, Listable},
        value::{Timestamp, Value},
    };
}
