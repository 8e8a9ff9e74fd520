//! Observability: listing events and the sink boundary they flow through.
//!
//! Query logic never logs directly. It records `ListingEvent`s, and the
//! active sink decides what to do with them (structured `tracing` output by
//! default, capture in tests).

pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use sink::{ListingEvent, ListingSink, TracingSink, with_sink};
