//! Document operations.

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use snapdoc_core::error::AppError;
use snapdoc_core::result::AppResult;
use snapdoc_core::traits::imaging::{NormalizeOptions, ThumbnailOptions};
use snapdoc_entity::document::{CreateDocument, Document, UpdateDocument};

use super::{DocumentStore, DOCUMENTS_DIR, THUMBNAILS_DIR};

/// Request to save a processed capture as a new document.
#[derive(Debug, Clone)]
pub struct SaveDocumentRequest {
    /// Raw capture bytes as produced by the camera.
    pub image: Bytes,
    /// Title; derived from the capture date when absent.
    pub title: Option<String>,
    /// Category tag; defaults to `"general"`.
    pub category: Option<String>,
    /// Target folder (None for root level).
    pub folder_id: Option<i64>,
}

impl DocumentStore {
    /// Process a capture into a normalized image + thumbnail, persist both
    /// blobs, and insert the document row.
    ///
    /// Blob writes always precede the row insert; if anything fails after a
    /// blob has been written, the written blobs are deleted again so no
    /// orphans outlive the failed save.
    pub async fn save_document(&self, req: SaveDocumentRequest) -> AppResult<Document> {
        let normalized = self
            .imaging
            .normalize(
                req.image,
                &NormalizeOptions {
                    target_width: self.config.document_width,
                    quality: self.config.document_quality,
                },
            )
            .await?;
        let thumbnail = self
            .imaging
            .thumbnail(
                normalized.clone(),
                &ThumbnailOptions {
                    target_width: self.config.thumbnail_width,
                    target_height: self.config.thumbnail_height,
                    quality: self.config.thumbnail_quality,
                },
            )
            .await?;

        let stamp = blob_stamp();
        let file_path = format!("{DOCUMENTS_DIR}/doc_{stamp}.jpg");
        let thumbnail_path = format!("{THUMBNAILS_DIR}/thumb_{stamp}.jpg");

        self.blobs.write(&file_path, normalized).await?;
        let written = [file_path.as_str(), thumbnail_path.as_str()];

        if let Err(e) = self.blobs.write(&thumbnail_path, thumbnail).await {
            self.discard_blobs(&written[..1]).await;
            return Err(e);
        }

        let file_size = match self.blobs.stat(&file_path).await {
            Ok(meta) => meta.size_bytes as i64,
            Err(e) => {
                self.discard_blobs(&written).await;
                return Err(e);
            }
        };

        let data = CreateDocument {
            title: derive_title(req.title),
            file_path: file_path.clone(),
            thumbnail_path: Some(thumbnail_path.clone()),
            file_size,
            category: derive_category(req.category),
            tags: None,
            folder_id: req.folder_id,
        };

        match self.documents.create(&data).await {
            Ok(doc) => {
                info!(
                    document_id = doc.id,
                    title = %doc.title,
                    size_bytes = doc.file_size,
                    folder_id = ?doc.folder_id,
                    "Document saved"
                );
                Ok(doc)
            }
            Err(e) => {
                self.discard_blobs(&written).await;
                Err(e)
            }
        }
    }

    /// Get a document by ID.
    pub async fn get_document(&self, document_id: i64) -> AppResult<Document> {
        self.documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))
    }

    /// List direct members of a folder (`None` for root level), newest
    /// first.
    pub async fn list_documents(&self, folder_id: Option<i64>) -> AppResult<Vec<Document>> {
        self.documents.find_by_folder(folder_id).await
    }

    /// List every document regardless of folder, newest first.
    pub async fn list_all_documents(&self) -> AppResult<Vec<Document>> {
        self.documents.find_all().await
    }

    /// Move a document to another folder (`None` moves it to root level).
    pub async fn move_document(
        &self,
        document_id: i64,
        folder_id: Option<i64>,
    ) -> AppResult<Document> {
        let doc = self.documents.move_to_folder(document_id, folder_id).await?;
        info!(document_id, folder_id = ?folder_id, "Document moved");
        Ok(doc)
    }

    /// Overwrite the user-editable fields of a document.
    pub async fn update_document(
        &self,
        document_id: i64,
        update: UpdateDocument,
    ) -> AppResult<Document> {
        if update.title.trim().is_empty() {
            return Err(AppError::invalid_argument("Document title cannot be empty"));
        }

        let doc = self.documents.update(document_id, &update).await?;
        info!(document_id, title = %doc.title, "Document updated");
        Ok(doc)
    }

    /// Delete a document's blobs and row.
    ///
    /// Idempotent — deleting an absent id returns `false`.
    pub async fn delete_document(&self, document_id: i64) -> AppResult<bool> {
        let Some(doc) = self.documents.find_by_id(document_id).await? else {
            return Ok(false);
        };

        self.remove_document_blobs(&doc).await?;
        let deleted = self.documents.delete(document_id).await?;
        info!(document_id, "Document deleted");
        Ok(deleted)
    }

    /// Delete the blobs backing a document. Absent blobs are not an error.
    pub(crate) async fn remove_document_blobs(&self, doc: &Document) -> AppResult<()> {
        self.blobs.delete(&doc.file_path).await?;
        if let Some(thumbnail_path) = &doc.thumbnail_path {
            self.blobs.delete(thumbnail_path).await?;
        }
        Ok(())
    }

    /// Best-effort removal of blobs written by a save that later failed.
    async fn discard_blobs(&self, paths: &[&str]) {
        for &path in paths {
            if let Err(e) = self.blobs.delete(path).await {
                warn!(path, error = %e, "Failed to clean up blob after failed save");
            }
        }
    }
}

/// Title fallback: a capture-date-derived name.
fn derive_title(title: Option<String>) -> String {
    match title {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => format!("Document {}", Utc::now().format("%Y-%m-%d")),
    }
}

/// Category fallback.
fn derive_category(category: Option<String>) -> String {
    match category {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => "general".to_string(),
    }
}

/// Collision-resistant blob name stem: capture timestamp plus a short
/// random suffix so same-millisecond saves cannot clash.
fn blob_stamp() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{millis}_{}", &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title_falls_back_to_capture_date() {
        assert_eq!(derive_title(Some("Lease".into())), "Lease");
        assert_eq!(derive_title(Some("  Lease  ".into())), "Lease");
        assert!(derive_title(None).starts_with("Document "));
        assert!(derive_title(Some("   ".into())).starts_with("Document "));
    }

    #[test]
    fn test_derive_category_defaults_to_general() {
        assert_eq!(derive_category(Some("receipts".into())), "receipts");
        assert_eq!(derive_category(None), "general");
        assert_eq!(derive_category(Some("".into())), "general");
    }

    #[test]
    fn test_blob_stamps_are_unique() {
        let a = blob_stamp();
        let b = blob_stamp();
        assert_ne!(a, b);
    }
}
