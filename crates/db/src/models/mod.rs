//! Row types and DTOs for the `summaries` table.

pub mod summary;
