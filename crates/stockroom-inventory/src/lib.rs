//! In-memory item registry for Stockroom.
//!
//! [`Inventory`] maps [`ItemId`]s to [`Item`] records and owns the link
//! between a record and its photo blob. Whenever a photo is replaced or an
//! item is deleted, the inventory releases the old blob through the
//! [`BlobStore`](stockroom_blob::BlobStore) it was built with, so the blob
//! root does not accumulate orphans.
//!
//! Nothing is persisted: the registry lives as long as the process.

pub mod error;
pub mod item;
pub mod store;

pub use error::{InventoryError, InventoryResult};
pub use item::{Item, ItemId, ItemUpdate};
pub use store::Inventory;
