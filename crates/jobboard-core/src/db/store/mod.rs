//! Reference storage adapters.
//!
//! `memory` evaluates trees in process and backs tests and local
//! development; `sql` renders trees into parameterized PostgreSQL for
//! adapters that talk to a real database.

mod memory;
pub mod sql;


// re-exports
pub use memory::MemoryStore;
