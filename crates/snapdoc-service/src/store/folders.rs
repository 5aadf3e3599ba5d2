//! Folder operations.

use tracing::info;

use snapdoc_core::error::AppError;
use snapdoc_core::result::AppResult;
use snapdoc_entity::folder::{CreateFolder, Folder};

use super::DocumentStore;

impl DocumentStore {
    /// Create a folder, optionally inside a parent.
    ///
    /// A dangling `parent_id` is rejected by the foreign key and surfaces
    /// as a constraint violation.
    pub async fn create_folder(&self, name: &str, parent_id: Option<i64>) -> AppResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_argument("Folder name cannot be empty"));
        }

        let folder = self
            .folders
            .create(&CreateFolder {
                name: name.to_string(),
                parent_id,
            })
            .await?;

        info!(folder_id = folder.id, name = %folder.name, "Folder created");
        Ok(folder)
    }

    /// Rename a folder.
    pub async fn rename_folder(&self, folder_id: i64, new_name: &str) -> AppResult<Folder> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::invalid_argument("Folder name cannot be empty"));
        }

        let folder = self.folders.rename(folder_id, new_name).await?;
        info!(folder_id, new_name = %folder.name, "Folder renamed");
        Ok(folder)
    }

    /// Get a folder by ID.
    pub async fn get_folder(&self, folder_id: i64) -> AppResult<Folder> {
        self.folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// List direct children of a folder (`None` for root level), name
    /// ascending.
    pub async fn list_folders(&self, parent_id: Option<i64>) -> AppResult<Vec<Folder>> {
        self.folders.find_children(parent_id).await
    }

    /// Delete a folder, every folder below it, and every document they
    /// contain — rows and blobs.
    ///
    /// The relational cascade only removes rows, so the documents of the
    /// whole subtree are collected up front: their blobs are deleted at all
    /// depths, then their rows, then the folder row itself. Idempotent —
    /// deleting an absent id returns `false`.
    pub async fn delete_folder(&self, folder_id: i64) -> AppResult<bool> {
        if self.folders.find_by_id(folder_id).await?.is_none() {
            return Ok(false);
        }

        let docs = self.documents.find_in_folder_tree(folder_id).await?;
        for doc in &docs {
            self.remove_document_blobs(doc).await?;
        }
        self.documents.delete_in_folder_tree(folder_id).await?;

        let deleted = self.folders.delete(folder_id).await?;
        info!(
            folder_id,
            documents_removed = docs.len(),
            "Folder deleted"
        );
        Ok(deleted)
    }
}
