use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BlobResult;
use crate::reference::BlobRef;

/// Storage for opaque photo payloads.
///
/// Implementations must satisfy these invariants:
/// - `put` always stores under a fresh reference and never overwrites.
/// - A failed `put` leaves nothing behind.
/// - `remove` of a reference whose content is already gone succeeds.
/// - `read` of a reference whose content is gone returns `NotFound`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `data` and return the reference it was stored under.
    async fn put(&self, data: Bytes) -> BlobResult<BlobRef>;

    /// Read the full content of a blob.
    async fn read(&self, blob: &BlobRef) -> BlobResult<Bytes>;

    /// Delete a blob.
    ///
    /// Callers treat failures as non-fatal housekeeping errors.
    async fn remove(&self, blob: &BlobRef) -> BlobResult<()>;
}
