//! Listing responses.

use derive_more::{Deref, IntoIterator};
use serde::Serialize;

///
/// Page
///
/// One window of a listing. `total_count` counts every row matching the
/// full predicate (scope included) regardless of the window; `has_more`
/// is `offset + items.len() < total_count`.
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[deref]
    #[into_iterator(owned, ref)]
    items: Vec<T>,
    total_count: u64,
    has_more: bool,
    offset: u64,
    limit: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(
        items: Vec<T>,
        total_count: u64,
        has_more: bool,
        offset: u64,
        limit: u32,
    ) -> Self {
        Self {
            items,
            total_count,
            has_more,
            offset,
            limit,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Effective (clamped) limit used for this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Convert every item, keeping the window metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            has_more: self.has_more,
            offset: self.offset,
            limit: self.limit,
        }
    }
}
