//! The document store: construction, initialization, and shared state.

pub mod documents;
pub mod folders;
pub mod search;
pub mod stats;

use std::sync::Arc;

use tracing::info;

use snapdoc_core::config::StorageConfig;
use snapdoc_core::result::AppResult;
use snapdoc_core::traits::blob::BlobStore;
use snapdoc_core::traits::imaging::ImageProcessor;
use snapdoc_database::connection::DatabasePool;
use snapdoc_database::migration;
use snapdoc_database::repositories::{DocumentRepository, FolderRepository};

/// Managed directory for full document images, relative to the blob root.
pub const DOCUMENTS_DIR: &str = "documents";
/// Managed directory for thumbnails, relative to the blob root.
pub const THUMBNAILS_DIR: &str = "thumbnails";

/// Owns the document/folder schema and every operation against it.
///
/// One instance is constructed at process start and passed down to the UI
/// layer; operations cannot run against an uninitialized store because the
/// value only exists after [`DocumentStore::initialize`] returns.
#[derive(Clone)]
pub struct DocumentStore {
    /// Folder repository.
    folders: FolderRepository,
    /// Document repository.
    documents: DocumentRepository,
    /// Blob persistence collaborator.
    blobs: Arc<dyn BlobStore>,
    /// Image post-processing collaborator.
    imaging: Arc<dyn ImageProcessor>,
    /// Image sizing/quality settings.
    config: StorageConfig,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore").finish()
    }
}

impl DocumentStore {
    /// Create the managed blob directories, bring the schema up to date,
    /// and return the ready-to-use store.
    ///
    /// Idempotent: safe to run on every startup. Any failure leaves nothing
    /// half-owned — the caller simply does not get a store.
    pub async fn initialize(
        db: &DatabasePool,
        blobs: Arc<dyn BlobStore>,
        imaging: Arc<dyn ImageProcessor>,
        config: StorageConfig,
    ) -> AppResult<Self> {
        blobs.ensure_dir(DOCUMENTS_DIR).await?;
        blobs.ensure_dir(THUMBNAILS_DIR).await?;

        migration::run(db.pool()).await?;

        let pool = db.pool().clone();
        info!("Document store initialized");
        Ok(Self {
            folders: FolderRepository::new(pool.clone()),
            documents: DocumentRepository::new(pool),
            blobs,
            imaging,
            config,
        })
    }
}
