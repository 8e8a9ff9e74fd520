//! Job-board listings: job and application records, their canonical
//! vocabularies and filter inputs, and the scoped listing endpoints.
//!
//! The query engine itself lives in `jobboard-core`, re-exported as `core`.

pub use jobboard_core as core;

pub mod application;
pub mod job;
pub mod listing;
pub mod vocab;


//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        application::{Application, ApplicationFilterInput},
        job::{Job, JobFilterInput},
        listing::{Endpoint, JobBoard, ListingFilter, ListingRequest},
        vocab::{ApplicationStatus, EmploymentType, JobStatus},
    };
    pub use jobboard_core::prelude::*;
}
