//! Repository layer.
//!
//! [`SummaryStore`] is the persistence seam. [`PgSummaryStore`] is the
//! production implementation; [`MemorySummaryStore`] keeps rows in process
//! and backs the HTTP tests.

pub mod memory_store;
pub mod summary_repo;
pub mod summary_store;

pub use memory_store::MemorySummaryStore;
pub use summary_repo::PgSummaryStore;
pub use summary_store::SummaryStore;
