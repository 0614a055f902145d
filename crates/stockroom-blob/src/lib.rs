//! Filesystem blob storage for Stockroom.
//!
//! Item photos are opaque byte sequences kept as regular files inside a
//! single root directory. Records never hold a path; they hold a
//! [`BlobRef`], a server-generated file name that the store resolves
//! against its root.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`FsBlobStore`] -- one file per blob under a configured root directory
//!
//! # Design Rules
//!
//! 1. Blob names are generated by the store, never derived from user input.
//! 2. A failed write leaves no partial file behind.
//! 3. Removal is best-effort: callers decide whether a failure matters.
//! 4. A reference can outlive its file (removed out-of-band); reads then
//!    report [`BlobError::NotFound`] instead of failing hard.

pub mod error;
pub mod fs;
pub mod reference;
pub mod traits;

pub use error::{BlobError, BlobResult};
pub use fs::FsBlobStore;
pub use reference::BlobRef;
pub use traits::BlobStore;
