use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;
use stockroom_blob::{BlobRef, BlobStore};

use crate::error::{InventoryError, InventoryResult};
use crate::item::{Item, ItemId, ItemUpdate};

#[derive(Default)]
struct Registry {
    items: HashMap<ItemId, Item>,
    // Insertion order, so listings are deterministic.
    order: Vec<ItemId>,
}

/// In-memory item registry.
///
/// The registry sits behind a single `RwLock` that is never held across an
/// `.await`: blob I/O happens before or after the critical section. Calls on
/// different items never interfere; concurrent writes to the same item are
/// last-write-wins.
pub struct Inventory {
    registry: RwLock<Registry>,
    blobs: Arc<dyn BlobStore>,
}

impl Inventory {
    /// Create an empty inventory storing photos in `blobs`.
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            blobs,
        }
    }

    /// The blob store photos are resolved against.
    pub fn blobs(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    /// Returns `true` if there are no live items.
    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    /// Register a new item.
    ///
    /// The name is checked before anything touches disk. An empty `photo`
    /// counts as no photo. If storing the photo fails, no record is created.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        photo: Option<Bytes>,
    ) -> InventoryResult<Item> {
        if name.is_empty() {
            return Err(InventoryError::Validation("name is required".into()));
        }
        let photo = match photo.filter(|p| !p.is_empty()) {
            Some(data) => Some(self.blobs.put(data).await?),
            None => None,
        };

        let item = Item {
            id: ItemId::generate(),
            name: name.to_string(),
            description: description.unwrap_or_default().to_string(),
            photo,
        };
        {
            let mut registry = self.write();
            registry.order.push(item.id);
            registry.items.insert(item.id, item.clone());
        }
        tracing::info!(id = %item.id, name = %item.name, photo = item.has_photo(), "item registered");
        Ok(item)
    }

    /// Fetch a single item.
    pub fn get(&self, id: &ItemId) -> InventoryResult<Item> {
        self.read()
            .items
            .get(id)
            .cloned()
            .ok_or(InventoryError::NotFound(*id))
    }

    /// All live items in registration order.
    pub fn list(&self) -> Vec<Item> {
        let registry = self.read();
        registry
            .order
            .iter()
            .filter_map(|id| registry.items.get(id).cloned())
            .collect()
    }

    /// Apply a partial update to an item's text fields.
    pub fn update(&self, id: &ItemId, update: ItemUpdate) -> InventoryResult<Item> {
        let mut registry = self.write();
        let item = registry
            .items
            .get_mut(id)
            .ok_or(InventoryError::NotFound(*id))?;
        update.apply(item);
        tracing::info!(%id, "item updated");
        Ok(item.clone())
    }

    /// Remove an item and release its photo.
    ///
    /// The record is gone even if the photo file cannot be deleted; that
    /// failure is only logged.
    pub async fn delete(&self, id: &ItemId) -> InventoryResult<()> {
        let removed = {
            let mut registry = self.write();
            let removed = registry
                .items
                .remove(id)
                .ok_or(InventoryError::NotFound(*id))?;
            registry.order.retain(|live| live != id);
            removed
        };
        if let Some(blob) = &removed.photo {
            self.release(blob).await;
        }
        tracing::info!(%id, "item deleted");
        Ok(())
    }

    /// Replace an item's photo.
    ///
    /// The new blob is written before the old one is released, so a failed
    /// write leaves the previous photo in place.
    pub async fn set_photo(&self, id: &ItemId, data: Bytes) -> InventoryResult<Item> {
        if !self.read().items.contains_key(id) {
            return Err(InventoryError::NotFound(*id));
        }
        if data.is_empty() {
            return Err(InventoryError::Validation("photo body is empty".into()));
        }
        let blob = self.blobs.put(data).await?;

        let swapped = {
            let mut registry = self.write();
            registry.items.get_mut(id).map(|item| {
                let previous = item.photo.replace(blob.clone());
                (item.clone(), previous)
            })
        };
        match swapped {
            Some((item, previous)) => {
                if let Some(previous) = previous {
                    self.release(&previous).await;
                }
                tracing::info!(%id, %blob, "photo replaced");
                Ok(item)
            }
            None => {
                // Deleted while the blob was being written.
                self.release(&blob).await;
                Err(InventoryError::NotFound(*id))
            }
        }
    }

    /// The photo reference of an item, if it has one.
    pub fn photo_ref(&self, id: &ItemId) -> InventoryResult<Option<BlobRef>> {
        Ok(self.get(id)?.photo)
    }

    async fn release(&self, blob: &BlobRef) {
        if let Err(e) = self.blobs.remove(blob).await {
            tracing::warn!(%blob, error = %e, "failed to release photo blob");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("item_count", &self.len())
            .finish()
    }
}
