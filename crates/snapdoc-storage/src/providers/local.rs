//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use snapdoc_core::error::{AppError, ErrorKind};
use snapdoc_core::result::AppResult;
use snapdoc_core::traits::blob::{BlobMeta, BlobStore};

/// Blob store backed by a local directory tree.
///
/// All paths are interpreted relative to the configured root, so document
/// rows stay valid when the data directory is relocated.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a new blob store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a relative path to an absolute path within the root.
    fn resolve(&self, path: &str) -> PathBuf {
        let clean = path.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path);
        Ok(full_path.exists())
    }

    async fn ensure_dir(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        fs::create_dir_all(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory: {path}"),
                e,
            )
        })?;
        Ok(())
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path);
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {path}"),
                e,
            )
        })?;

        debug!(path, bytes = data.len(), "Wrote blob");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete blob: {path}"),
                    e,
                )
            })?;
            debug!(path, "Deleted blob");
        }
        Ok(())
    }

    async fn stat(&self, path: &str) -> AppResult<BlobMeta> {
        let full_path = self.resolve(path);
        let meta = fs::metadata(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to stat blob: {path}"),
                    e,
                )
            }
        })?;

        Ok(BlobMeta {
            path: path.to_string(),
            size_bytes: meta.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (LocalBlobStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_write_stat_delete() {
        let (store, _dir) = store().await;

        let data = Bytes::from("fake jpeg payload");
        store.write("documents/a.jpg", data.clone()).await.unwrap();

        assert!(store.exists("documents/a.jpg").await.unwrap());
        let meta = store.stat("documents/a.jpg").await.unwrap();
        assert_eq!(meta.size_bytes, data.len() as u64);

        store.delete("documents/a.jpg").await.unwrap();
        assert!(!store.exists("documents/a.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (store, _dir) = store().await;

        store.delete("documents/never-existed.jpg").await.unwrap();
        store.write("documents/b.jpg", Bytes::from("x")).await.unwrap();
        store.delete("documents/b.jpg").await.unwrap();
        store.delete("documents/b.jpg").await.unwrap();
    }

    #[tokio::test]
    async fn test_stat_missing_is_not_found() {
        let (store, _dir) = store().await;

        let err = store.stat("documents/missing.jpg").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let (store, dir) = store().await;

        store.ensure_dir("thumbnails").await.unwrap();
        store.ensure_dir("thumbnails").await.unwrap();
        assert!(dir.path().join("thumbnails").is_dir());
    }
}
