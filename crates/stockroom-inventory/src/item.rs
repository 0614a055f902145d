use std::fmt;
use std::str::FromStr;

use stockroom_blob::BlobRef;
use uuid::Uuid;

/// Server-assigned identifier of an inventory item.
///
/// Backed by a UUIDv7, so identifiers are never reused for the lifetime of
/// the process (or across restarts).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// An inventory record.
///
/// `photo` is a server-only locator. It must never reach a client; the HTTP
/// layer maps records to a separate view type instead of serializing this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub photo: Option<BlobRef>,
}

impl Item {
    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }
}

/// Partial update of an item's text fields.
///
/// `None` and empty strings both leave the stored value untouched; there is
/// no way to clear a field through an update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn apply(self, item: &mut Item) {
        if let Some(name) = self.name.filter(|n| !n.is_empty()) {
            item.name = name;
        }
        if let Some(description) = self.description.filter(|d| !d.is_empty()) {
            item.description = description;
        }
    }
}
