//! Filter model: criteria, caller ordering, page windows, and the immutable
//! FilterSet they aggregate into. Purely declarative; nothing here consults
//! an entity model or touches storage.

mod criterion;
mod error;
mod input;
mod page;
mod set;
mod sort;


pub(crate) use criterion::canonical_set;
pub use criterion::{Criterion, Operator, RangeBound, RangeBounds};
pub use error::ValidationError;
pub use input::{FilterInput, RangeInput};
pub use page::{PageRequest, PageWindow};
pub use set::FilterSet;
pub use sort::{SortDirection, SortKey, SortSpec};
