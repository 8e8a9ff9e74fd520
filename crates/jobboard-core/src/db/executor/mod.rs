//! Paged execution of compiled queries against a storage adapter.

mod storage;

#[cfg(test)]
mod tests;

use crate::{
    config::ListingConfig,
    db::{predicate::CompiledQuery, response::Page},
    error::ListingError,
    obs::{ListingEvent, sink::record},
};

// re-exports
pub use storage::{StorageError, StorageExecutor, StoragePage};

///
/// PagedQueryExecutor
///
/// Runs a CompiledQuery against one store and shapes the answer into a
/// Page. Stateless apart from its borrowed store and config, so a single
/// executor may serve any number of concurrent requests.
///

#[derive(Debug)]
pub struct PagedQueryExecutor<'a, S: ?Sized> {
    store: &'a S,
    config: ListingConfig,
}

impl<'a, S> PagedQueryExecutor<'a, S>
where
    S: StorageExecutor + ?Sized,
{
    #[must_use]
    pub const fn new(store: &'a S, config: ListingConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ListingConfig {
        &self.config
    }

    ///
    /// Execute one compiled query.
    ///
    /// The requested limit is clamped to `max_limit` without error. The
    /// store is always called, even for a constant-false tree, so the
    /// count and the rows come from the same evaluation.
    ///
    pub fn execute(&self, query: &CompiledQuery) -> Result<Page<S::Row>, ListingError> {
        let requested = query.page();
        let window = requested.clamped(self.config.max_limit);
        let offset = window.offset();
        let limit = window.limit();

        let StoragePage {
            mut rows,
            total_count,
        } = self.store.fetch(
            query.model(),
            query.predicate(),
            query.sort(),
            offset,
            limit,
        )?;

        // adapters may not widen the window
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        let returned = u64::try_from(rows.len()).unwrap_or(u64::MAX);
        let has_more = offset.saturating_add(returned) < total_count;

        record(&ListingEvent::Executed {
            entity: query.entity(),
            fingerprint: query.fingerprint(),
            offset,
            limit,
            clamped: window != requested,
            returned,
            total_count,
        });

        Ok(Page::new(rows, total_count, has_more, offset, limit))
    }
}
