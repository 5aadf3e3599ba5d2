//! Combined listing and global search.

use snapdoc_core::result::AppResult;
use snapdoc_entity::item::ScanItem;

use super::DocumentStore;

impl DocumentStore {
    /// Folders and documents directly inside a folder (`None` for root
    /// level), folders first.
    ///
    /// Folders sorting above documents is a presentation contract relied on
    /// by every mixed listing.
    pub async fn list_items(&self, folder_id: Option<i64>) -> AppResult<Vec<ScanItem>> {
        let folders = self.folders.find_children(folder_id).await?;
        let documents = self.documents.find_by_folder(folder_id).await?;

        Ok(folders
            .into_iter()
            .map(ScanItem::Folder)
            .chain(documents.into_iter().map(ScanItem::Document))
            .collect())
    }

    /// Global case-insensitive substring search over folder names and
    /// document titles, folders first.
    ///
    /// An empty query matches everything, degrading to a global browse.
    pub async fn search(&self, query: &str) -> AppResult<Vec<ScanItem>> {
        let folders = self.folders.search(query).await?;
        let documents = self.documents.search(query).await?;

        Ok(folders
            .into_iter()
            .map(ScanItem::Folder)
            .chain(documents.into_iter().map(ScanItem::Document))
            .collect())
    }
}
