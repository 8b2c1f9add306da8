//! Domain types and pure logic for the text summarization service.
//!
//! Nothing in this crate performs I/O. Persistence lives in `textsum-db`
//! and the HTTP surface in `textsum-api`.

pub mod error;
pub mod options;
pub mod pagination;
pub mod roles;
pub mod stats;
pub mod summarization;
pub mod types;
