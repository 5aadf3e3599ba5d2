//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scanned document stored in Snapdoc.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier, store-assigned.
    pub id: i64,
    /// Document title.
    pub title: String,
    /// Blob-store path of the full processed image.
    pub file_path: String,
    /// Blob-store path of the thumbnail.
    pub thumbnail_path: Option<String>,
    /// Byte size of the full image at save time.
    pub file_size: i64,
    /// Number of pages (reserved; single-page captures today).
    pub page_count: i64,
    /// Free-text category tag.
    pub category: String,
    /// Caller-supplied free-text tags.
    pub tags: Option<String>,
    /// Extracted text, populated by an external OCR collaborator.
    pub ocr_text: Option<String>,
    /// Containing folder (null for root-level documents).
    pub folder_id: Option<i64>,
    /// When the document was saved.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Check if this document sits at root level (not in any folder).
    pub fn is_root(&self) -> bool {
        self.folder_id.is_none()
    }
}

/// Data required to insert a new document row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// Document title.
    pub title: String,
    /// Blob-store path of the full processed image.
    pub file_path: String,
    /// Blob-store path of the thumbnail.
    pub thumbnail_path: Option<String>,
    /// Byte size of the full image.
    pub file_size: i64,
    /// Free-text category tag.
    pub category: String,
    /// Caller-supplied free-text tags.
    pub tags: Option<String>,
    /// Containing folder (None for root-level).
    pub folder_id: Option<i64>,
}

/// Full overwrite of the user-editable document fields.
///
/// `title` and `category` are required so an update can never null out a
/// non-nullable column; omitting `tags` clears them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDocument {
    /// New title.
    pub title: String,
    /// New category.
    pub category: String,
    /// New tags (None clears existing tags).
    pub tags: Option<String>,
}
