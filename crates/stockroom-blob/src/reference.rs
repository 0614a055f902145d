use std::fmt;

use uuid::Uuid;

/// File extension given to every stored blob.
pub const BLOB_EXTENSION: &str = "blob";

/// Server-only locator for a stored blob.
///
/// A `BlobRef` is a bare file name relative to the store root. It is
/// generated from a UUIDv7, which combines a millisecond timestamp with
/// random bits, so two references never collide and none can be steered
/// by client input. There is no way to build one from a string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlobRef {
    name: String,
}

impl BlobRef {
    /// Generate a fresh, unique reference.
    pub fn generate() -> Self {
        Self {
            name: format!("{}.{BLOB_EXTENSION}", Uuid::now_v7().simple()),
        }
    }

    /// The file name inside the store root.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobRef({})", self.name)
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
