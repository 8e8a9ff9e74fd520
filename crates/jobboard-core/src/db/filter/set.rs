use crate::{
    db::filter::{Criterion, Operator, PageWindow, SortSpec, criterion::canonical_set},
    value::Value,
};
use std::collections::BTreeMap;

///
/// FilterSet
///
/// Immutable aggregate of named criteria, caller ordering, and a page
/// window for one listing request.
///
/// Every `with_*` method returns a new value and leaves the receiver
/// untouched, so a FilterSet can be shared read-only across threads.
/// Criterion keys are unique; the `BTreeMap` keeps them in the stable
/// alphabetical order the compiler relies on.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSet {
    criteria: BTreeMap<String, Criterion>,
    sort: SortSpec,
    page: PageWindow,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `criterion` stored under `key`. Inert criteria are
    /// not stored: an absent input contributes no constraint.
    #[must_use]
    pub fn with_criterion(&self, key: impl Into<String>, criterion: Criterion) -> Self {
        let mut next = self.clone();
        if !criterion.is_inert() {
            next.criteria.insert(key.into(), criterion);
        }

        next
    }

    ///
    /// Return a copy with `values` unioned into the IN criterion at `key`.
    ///
    /// Shorthand inputs (a single `status` next to a `statuses` set) both
    /// land here, so neither silently wins over the other. `None` leaves the
    /// set unchanged; `Some(vec![])` on a fresh key yields a match-nothing IN.
    ///
    #[must_use]
    pub fn with_membership(
        &self,
        key: impl Into<String>,
        field: &str,
        values: Option<Vec<Value>>,
    ) -> Self {
        let Some(values) = values else {
            return self.clone();
        };

        let key = key.into();
        let merged = match self.criteria.get(&key) {
            Some(existing) if existing.op() == Operator::In && existing.field() == field => {
                existing.union_values(values)
            }
            _ => Criterion::in_(field, canonical_set(values)),
        };

        let mut next = self.clone();
        next.criteria.insert(key, merged);

        next
    }

    #[must_use]
    pub fn with_sort(&self, sort: SortSpec) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_page(&self, page: PageWindow) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Criteria in stable key order.
    pub fn criteria(&self) -> impl Iterator<Item = (&str, &Criterion)> {
        self.criteria
            .iter()
            .map(|(key, criterion)| (key.as_str(), criterion))
    }

    #[must_use]
    pub fn criterion(&self, key: &str) -> Option<&Criterion> {
        self.criteria.get(key)
    }

    #[must_use]
    pub const fn sort(&self) -> &SortSpec {
        &self.sort
    }

    #[must_use]
    pub const fn page(&self) -> PageWindow {
        self.page
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
