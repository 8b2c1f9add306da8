use textsum_core::types::DbId;

/// Errors surfaced by [`crate::repositories::SummaryStore`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A JSON text column could not be encoded or decoded.
    #[error("Malformed stored JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A row that would break one of the table's `CHECK` constraints.
    #[error("Row violates check constraint {0}")]
    Constraint(&'static str),
}
