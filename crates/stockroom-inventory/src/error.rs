use stockroom_blob::BlobError;

use crate::item::ItemId;

/// Errors from inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// No live item has this identifier.
    #[error("item not found: {0}")]
    NotFound(ItemId),

    /// Required input is missing or empty.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The blob store failed while writing photo content.
    #[error("photo storage failed: {0}")]
    Blob(#[from] BlobError),
}

/// Result alias for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;
