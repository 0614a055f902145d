use std::path::PathBuf;
use std::sync::Arc;

use stockroom_inventory::Inventory;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub inventory: Arc<Inventory>,
    pub static_dir: Arc<PathBuf>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(inventory: Arc<Inventory>, static_dir: PathBuf, max_upload_bytes: usize) -> Self {
        Self {
            inventory,
            static_dir: Arc::new(static_dir),
            max_upload_bytes,
        }
    }
}
