use super::*;
use crate::{
    db::{
        filter::{FilterSet, PageWindow},
        predicate::{Predicate, PredicateCompiler, SortDirective},
        scope::{ScopeContext, ScopeGuard},
    },
    error::ErrorKind,
    model::entity::EntityModel,
    obs::{ListingSink, with_sink},
    test_fixtures::{POSTING, active},
};
use std::{
    cell::RefCell,
    rc::Rc,
    sync::Mutex,
};

///
/// StubStore
/// Returns `total` synthetic rows and records every window it is asked for.
///

struct StubStore {
    total: u64,
    windows: Mutex<Vec<(u64, u32)>>,
}

impl StubStore {
    fn new(total: u64) -> Self {
        Self {
            total,
            windows: Mutex::new(Vec::new()),
        }
    }
}

impl StorageExecutor for StubStore {
    type Row = u64;

    fn fetch(
        &self,
        _model: &'static EntityModel,
        _predicate: &Predicate,
        _sort: &SortDirective,
        offset: u64,
        limit: u32,
    ) -> Result<StoragePage<u64>, StorageError> {
        self.windows.lock().unwrap().push((offset, limit));
        let end = self.total.min(offset + u64::from(limit));
        let rows = (offset.min(end)..end).collect();

        Ok(StoragePage::new(rows, self.total))
    }
}

struct FailingStore;

impl StorageExecutor for FailingStore {
    type Row = u64;

    fn fetch(
        &self,
        _model: &'static EntityModel,
        _predicate: &Predicate,
        _sort: &SortDirective,
        _offset: u64,
        _limit: u32,
    ) -> Result<StoragePage<u64>, StorageError> {
        Err(StorageError::timeout("statement timeout after 5s"))
    }
}

#[derive(Default)]
struct CaptureSink(RefCell<Vec<ListingEvent>>);

impl ListingSink for CaptureSink {
    fn record(&self, event: &ListingEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

fn query(offset: u64, limit: u32) -> CompiledQuery {
    let scope = ScopeGuard::visibility("status", vec![active()])
        .constraint(&ScopeContext::anonymous(), POSTING.path)
        .unwrap();
    let filter = FilterSet::new().with_page(PageWindow::new(offset, limit));

    PredicateCompiler::new(&POSTING).compile(&filter, scope).unwrap()
}

#[test]
fn has_more_tracks_the_window_end() {
    let store = StubStore::new(25);
    let executor = PagedQueryExecutor::new(&store, ListingConfig::default());

    let first = executor.execute(&query(0, 10)).unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first.total_count(), 25);
    assert!(first.has_more());

    let last = executor.execute(&query(20, 10)).unwrap();
    assert_eq!(last.items(), &[20, 21, 22, 23, 24]);
    assert!(!last.has_more());
}

#[test]
fn empty_result_is_a_page_not_an_error() {
    let store = StubStore::new(0);
    let page = PagedQueryExecutor::new(&store, ListingConfig::default())
        .execute(&query(0, 20))
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_count(), 0);
    assert!(!page.has_more());
}

#[test]
fn oversized_limit_is_clamped_silently() {
    let store = StubStore::new(500);
    let sink = Rc::new(CaptureSink::default());

    let page = with_sink(sink.clone(), || {
        PagedQueryExecutor::new(&store, ListingConfig::default()).execute(&query(0, 10_000))
    })
    .unwrap();

    assert_eq!(page.limit(), 100);
    assert_eq!(page.len(), 100);
    assert_eq!(store.windows.lock().unwrap().as_slice(), &[(0, 100)]);

    let events = sink.0.borrow();
    assert!(matches!(
        events.as_slice(),
        [ListingEvent::Executed {
            clamped: true,
            limit: 100,
            returned: 100,
            total_count: 500,
            ..
        }]
    ));
}

#[test]
fn storage_errors_propagate_unchanged() {
    let err = PagedQueryExecutor::new(&FailingStore, ListingConfig::default())
        .execute(&query(0, 20))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StorageTimeout);
    assert!(matches!(
        err,
        ListingError::Storage(StorageError::Timeout { ref message }) if message.contains("5s")
    ));
}

#[test]
fn page_map_keeps_window_metadata() {
    let store = StubStore::new(3);
    let page = PagedQueryExecutor::new(&store, ListingConfig::default())
        .execute(&query(1, 1))
        .unwrap()
        .map(|n| format!("row-{n}"));

    assert_eq!(page.items(), &["row-1".to_string()]);
    assert_eq!((page.offset(), page.limit(), page.total_count()), (1, 1, 3));
    assert!(page.has_more());
}

#[test]
fn page_serializes_camel_case() {
    let store = StubStore::new(2);
    let page = PagedQueryExecutor::new(&store, ListingConfig::default())
        .execute(&query(0, 5))
        .unwrap();

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "items": [0, 1],
            "totalCount": 2,
            "hasMore": false,
            "offset": 0,
            "limit": 5,
        })
    );
}
