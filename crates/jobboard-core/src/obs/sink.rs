//! Listing sink boundary.
//!
//! All instrumentation flows through `ListingEvent` and `ListingSink`.
//! `record` is the only bridge between execution logic and logging.

use crate::{
    db::QueryFingerprint,
    error::{ErrorClass, ErrorKind},
};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn ListingSink>>> = RefCell::new(None);
}

///
/// ListingEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ListingEvent {
    /// A request passed validation and scoping and produced a tree.
    Compiled {
        entity: &'static str,
        fingerprint: QueryFingerprint,
        leaves: usize,
        constant_false: bool,
    },

    /// Storage answered; `clamped` marks a limit above the configured max.
    Executed {
        entity: &'static str,
        fingerprint: QueryFingerprint,
        offset: u64,
        limit: u32,
        clamped: bool,
        returned: u64,
        total_count: u64,
    },

    /// The request failed; no partial result was produced.
    Rejected {
        entity: &'static str,
        class: ErrorClass,
        kind: ErrorKind,
        detail: String,
    },
}

///
/// ListingSink
///

pub trait ListingSink {
    fn record(&self, event: &ListingEvent);
}

///
/// TracingSink
/// Default sink: structured `tracing` events under the `jobboard` target.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ListingSink for TracingSink {
    fn record(&self, event: &ListingEvent) {
        match event {
            ListingEvent::Compiled {
                entity,
                fingerprint,
                leaves,
                constant_false,
            } => {
                tracing::debug!(
                    target: "jobboard",
                    entity,
                    fingerprint = %fingerprint,
                    leaves,
                    constant_false,
                    "listing compiled"
                );
            }

            ListingEvent::Executed {
                entity,
                fingerprint,
                offset,
                limit,
                clamped,
                returned,
                total_count,
            } => {
                if *clamped {
                    tracing::debug!(target: "jobboard", entity, limit, "page limit clamped");
                }
                tracing::info!(
                    target: "jobboard",
                    entity,
                    fingerprint = %fingerprint,
                    offset,
                    limit,
                    returned,
                    total_count,
                    "listing executed"
                );
            }

            ListingEvent::Rejected {
                entity,
                class,
                kind,
                detail,
            } => match class {
                ErrorClass::Storage => tracing::error!(
                    target: "jobboard",
                    entity,
                    %class,
                    %kind,
                    detail = detail.as_str(),
                    "listing failed"
                ),
                ErrorClass::Validation | ErrorClass::Authorization => tracing::warn!(
                    target: "jobboard",
                    entity,
                    %class,
                    %kind,
                    detail = detail.as_str(),
                    "listing rejected"
                ),
            },
        }
    }
}

pub(crate) const TRACING_SINK: TracingSink = TracingSink;

pub(crate) fn record(event: &ListingEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => TRACING_SINK.record(event),
    }
}

/// Run a closure with `sink` receiving this thread's listing events.
pub fn with_sink<T>(sink: Rc<dyn ListingSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn ListingSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
