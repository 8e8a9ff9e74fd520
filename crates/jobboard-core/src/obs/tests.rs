use super::*;
use crate::{
    error::{ErrorClass, ErrorKind},
    obs::sink::record,
};
use std::{cell::RefCell, rc::Rc};

#[derive(Default)]
struct CaptureSink(RefCell<Vec<ListingEvent>>);

impl ListingSink for CaptureSink {
    fn record(&self, event: &ListingEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

fn rejected(detail: &str) -> ListingEvent {
    ListingEvent::Rejected {
        entity: "test::Posting",
        class: ErrorClass::Validation,
        kind: ErrorKind::InvalidRange,
        detail: detail.to_string(),
    }
}

#[test]
fn override_receives_events_only_inside_scope() {
    let sink = Rc::new(CaptureSink::default());

    with_sink(sink.clone(), || record(&rejected("inside")));
    record(&rejected("outside"));

    assert_eq!(sink.0.borrow().as_slice(), &[rejected("inside")]);
}

#[test]
fn nested_overrides_restore_the_outer_sink() {
    let outer = Rc::new(CaptureSink::default());
    let inner = Rc::new(CaptureSink::default());

    with_sink(outer.clone(), || {
        with_sink(inner.clone(), || record(&rejected("inner")));
        record(&rejected("outer"));
    });

    assert_eq!(inner.0.borrow().as_slice(), &[rejected("inner")]);
    assert_eq!(outer.0.borrow().as_slice(), &[rejected("outer")]);
}

#[test]
fn override_is_restored_after_panic() {
    let sink = Rc::new(CaptureSink::default());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        with_sink::<()>(sink.clone(), || panic!("boom"));
    }));
    assert!(result.is_err());

    record(&rejected("after"));
    assert!(sink.0.borrow().is_empty());
}

#[test]
fn tracing_sink_accepts_every_event() {
    // no subscriber installed; this only exercises the formatting paths
    TracingSink.record(&rejected("detail"));
    TracingSink.record(&ListingEvent::Rejected {
        entity: "test::Posting",
        class: ErrorClass::Storage,
        kind: ErrorKind::StorageTimeout,
        detail: "timeout".into(),
    });
}
