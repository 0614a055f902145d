//! Client-facing shapes.
//!
//! Records hold a blob reference that must stay on the server. Everything a
//! handler returns goes through [`ItemView`], which carries a photo URL
//! instead.

use serde::Serialize;

use stockroom_inventory::{Item, ItemId};

/// URL at which an item's photo is served.
pub fn photo_url(id: &ItemId) -> String {
    format!("/inventory/{id}/photo")
}

/// JSON representation of an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl ItemView {
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            photo_url: item.photo.as_ref().map(|_| photo_url(&item.id)),
        }
    }

    /// Append a textual photo link to the description, if there is a photo.
    pub fn with_photo_link(mut self) -> Self {
        if let Some(url) = &self.photo_url {
            self.description = format!("{} [Photo Link: {url}]", self.description);
        }
        self
    }
}

/// Informational success body, `{"message": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
