//! Local filesystem blob backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{BlobError, BlobResult};
use crate::reference::BlobRef;
use crate::traits::BlobStore;

/// Blob store keeping one regular file per blob.
///
/// ```text
/// {root}/
///   {uuid-v7}.blob
///   {uuid-v7}.blob
/// ```
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open a store rooted at `root`, creating the directory and any missing
    /// ancestors.
    pub async fn open(root: impl Into<PathBuf>) -> BlobResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|source| BlobError::Root {
                path: root.clone(),
                source,
            })?;
        tracing::debug!(root = %root.display(), "blob root ready");
        Ok(Self { root })
    }

    /// Resolve a reference to its on-disk location.
    pub fn path_of(&self, blob: &BlobRef) -> PathBuf {
        self.root.join(blob.as_str())
    }

    async fn write_new(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, data: Bytes) -> BlobResult<BlobRef> {
        let blob = BlobRef::generate();
        let path = self.path_of(&blob);
        if let Err(source) = Self::write_new(&path, &data).await {
            // A collision (AlreadyExists) means the file is not ours to clean.
            if source.kind() != ErrorKind::AlreadyExists {
                match fs::remove_file(&path).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => tracing::warn!(%blob, error = %e, "failed to clean up partial blob"),
                }
            }
            return Err(BlobError::Storage { blob, source });
        }
        tracing::debug!(%blob, size = data.len(), "stored blob");
        Ok(blob)
    }

    async fn read(&self, blob: &BlobRef) -> BlobResult<Bytes> {
        let path = self.path_of(blob);
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                BlobError::NotFound(blob.clone())
            } else {
                BlobError::Io(e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn remove(&self, blob: &BlobRef) -> BlobResult<()> {
        let path = self.path_of(blob);
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(%blob, "removed blob");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()), // Already gone
            Err(e) => Err(BlobError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn open_creates_nested_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("a").join("b").join("cache");
        let store = FsBlobStore::open(&root).await.unwrap();
        assert!(root.is_dir());
        let blob = store.put(Bytes::from_static(b"x")).await.unwrap();
        assert_eq!(store.path_of(&blob).parent(), Some(root.as_path()));
    }

    #[tokio::test]
    async fn open_fails_when_root_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();
        let err = FsBlobStore::open(&file).await.unwrap_err();
        assert!(matches!(err, BlobError::Root { .. }));
    }

    #[tokio::test]
    async fn put_then_read_is_byte_exact() {
        let tmp = TempDir::new().unwrap();
        let store = FsBlobStore::open(tmp.path()).await.unwrap();
        let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

        let blob = store.put(Bytes::from(payload.clone())).await.unwrap();
        assert_eq!(store.read(&blob).await.unwrap(), Bytes::from(payload));
        assert!(store.path_of(&blob).starts_with(tmp.path()));
    }

    #[tokio::test]
    async fn puts_never_share_a_file() {
        let tmp = TempDir::new().unwrap();
        let store = FsBlobStore::open(tmp.path()).await.unwrap();
        let a = store.put(Bytes::from_static(b"same")).await.unwrap();
        let b = store.put(Bytes::from_static(b"same")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(file_count(tmp.path()), 2);
    }

    #[tokio::test]
    async fn remove_deletes_file_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = FsBlobStore::open(tmp.path()).await.unwrap();
        let blob = store.put(Bytes::from_static(b"photo")).await.unwrap();

        store.remove(&blob).await.unwrap();
        assert!(!store.path_of(&blob).exists());
        assert!(matches!(store.read(&blob).await, Err(BlobError::NotFound(_))));

        // Second removal of a missing file still succeeds.
        store.remove(&blob).await.unwrap();
    }

    #[tokio::test]
    async fn read_of_out_of_band_deleted_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = FsBlobStore::open(tmp.path()).await.unwrap();
        let blob = store.put(Bytes::from_static(b"photo")).await.unwrap();
        std::fs::remove_file(store.path_of(&blob)).unwrap();

        let err = store.read(&blob).await.unwrap_err();
        assert!(matches!(err, BlobError::NotFound(r) if r == blob));
    }

    #[tokio::test]
    async fn put_into_vanished_root_is_storage_error() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");
        let store = FsBlobStore::open(&root).await.unwrap();
        std::fs::remove_dir(&root).unwrap();

        let err = store.put(Bytes::from_static(b"photo")).await.unwrap_err();
        assert!(matches!(err, BlobError::Storage { .. }));
        assert!(!root.exists());
    }
}
