//! Blob store trait for pluggable file persistence backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Metadata about a stored blob.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BlobMeta {
    /// Path within the blob store.
    pub path: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

/// Trait for blob persistence backends.
///
/// A blob is an opaque binary file (scanned image or thumbnail) referenced
/// by a store-relative path from a document row. The document row owning a
/// path is the blob's sole owner; the store itself never tracks ownership.
///
/// The [`BlobStore`] trait is defined here in `snapdoc-core` and
/// implemented in `snapdoc-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether a blob exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Create a directory (and any missing parents). Idempotent.
    async fn ensure_dir(&self, path: &str) -> AppResult<()>;

    /// Write bytes to the given path, transferring ownership of the data
    /// into managed storage.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete the blob at the given path.
    ///
    /// Idempotent: deleting an absent path is success, not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Get metadata about a stored blob.
    async fn stat(&self, path: &str) -> AppResult<BlobMeta>;
}
