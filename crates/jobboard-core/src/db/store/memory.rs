use crate::{
    db::{
        executor::{StorageError, StorageExecutor, StoragePage},
        filter::SortDirection,
        predicate::{FieldPresence, Predicate, Row, SortDirective, eval},
    },
    model::entity::EntityModel,
    value::Value,
};
use std::{
    cmp::Ordering,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
};

///
/// MemoryStore
///
/// In-process store over a fixed row set. Evaluates the predicate row by
/// row, orders with the canonical value order (nulls first ascending, last
/// descending), then windows.
///

#[derive(Debug, Default)]
pub struct MemoryStore<R> {
    rows: Vec<R>,
    fetches: AtomicU64,
}

impl<R> MemoryStore<R> {
    #[must_use]
    pub const fn new(rows: Vec<R>) -> Self {
        Self {
            rows,
            fetches: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of `fetch` calls served so far.
    #[must_use]
    pub fn fetches(&self) -> u64 {
        self.fetches.load(AtomicOrdering::Relaxed)
    }
}

impl<R> StorageExecutor for MemoryStore<R>
where
    R: Row + Clone + Send + Sync,
{
    type Row = R;

    fn fetch(
        &self,
        _model: &'static EntityModel,
        predicate: &Predicate,
        sort: &SortDirective,
        offset: u64,
        limit: u32,
    ) -> Result<StoragePage<R>, StorageError> {
        self.fetches.fetch_add(1, AtomicOrdering::Relaxed);

        let mut matched: Vec<&R> = self.rows.iter().filter(|row| eval(*row, predicate)).collect();
        matched.sort_by(|a, b| compare_rows(*a, *b, sort));

        let total_count = u64::try_from(matched.len()).unwrap_or(u64::MAX);
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        let rows = matched.into_iter().skip(skip).take(take).cloned().collect();

        Ok(StoragePage::new(rows, total_count))
    }
}

fn compare_rows<R: Row>(left: &R, right: &R, sort: &SortDirective) -> Ordering {
    for key in sort.keys() {
        let ord = sort_value(left, &key.field).canonical_cmp(&sort_value(right, &key.field));
        let ord = match key.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}

fn sort_value<R: Row>(row: &R, field: &str) -> Value {
    match row.field(field) {
        FieldPresence::Present(value) => value,
        FieldPresence::Missing => Value::Null,
    }
}
