//! Document repository implementation.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use snapdoc_core::error::{AppError, ErrorKind};
use snapdoc_core::result::AppResult;
use snapdoc_entity::document::{CreateDocument, Document, UpdateDocument};

use super::like_pattern;

/// Repository for document CRUD, query, and aggregate operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a document by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// List direct members of a folder, newest first.
    ///
    /// `None` lists root-level documents.
    pub async fn find_by_folder(&self, folder_id: Option<i64>) -> AppResult<Vec<Document>> {
        let query = match folder_id {
            Some(folder) => sqlx::query_as::<_, Document>(
                "SELECT * FROM documents WHERE folder_id = $1 ORDER BY created_at DESC",
            )
            .bind(folder),
            None => sqlx::query_as::<_, Document>(
                "SELECT * FROM documents WHERE folder_id IS NULL ORDER BY created_at DESC",
            ),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// List every document, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list all documents", e)
            })
    }

    /// Documents assigned to a folder or any folder below it.
    pub async fn find_in_folder_tree(&self, folder_id: i64) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "WITH RECURSIVE tree (id) AS ( \
                 SELECT id FROM folders WHERE id = $1 \
                 UNION ALL \
                 SELECT f.id FROM folders f INNER JOIN tree t ON f.parent_id = t.id \
             ) SELECT d.* FROM documents d WHERE d.folder_id IN (SELECT id FROM tree)",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list subtree documents", e)
        })
    }

    /// Delete all document rows in a folder subtree.
    ///
    /// Row deletion only; the caller removes the blobs first.
    pub async fn delete_in_folder_tree(&self, folder_id: i64) -> AppResult<u64> {
        let result = sqlx::query(
            "WITH RECURSIVE tree (id) AS ( \
                 SELECT id FROM folders WHERE id = $1 \
                 UNION ALL \
                 SELECT f.id FROM folders f INNER JOIN tree t ON f.parent_id = t.id \
             ) DELETE FROM documents WHERE folder_id IN (SELECT id FROM tree)",
        )
        .bind(folder_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete subtree documents", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Create a new document row.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        let now = Utc::now();
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents \
             (title, file_path, thumbnail_path, file_size, category, tags, folder_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.file_path)
        .bind(&data.thumbnail_path)
        .bind(data.file_size)
        .bind(&data.category)
        .bind(&data.tags)
        .bind(data.folder_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::constraint(format!("Folder {:?} does not exist", data.folder_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create document", e),
        })
    }

    /// Overwrite the user-editable fields, refreshing the update time.
    pub async fn update(&self, document_id: i64, data: &UpdateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET title = $2, category = $3, tags = $4, updated_at = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(document_id)
        .bind(&data.title)
        .bind(&data.category)
        .bind(&data.tags)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?
        .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))
    }

    /// Move a document to a different folder (`None` moves to root).
    pub async fn move_to_folder(
        &self,
        document_id: i64,
        folder_id: Option<i64>,
    ) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET folder_id = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(document_id)
        .bind(folder_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::constraint(format!("Folder {folder_id:?} does not exist"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to move document", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))
    }

    /// Delete a document row.
    ///
    /// Returns whether a row was actually removed.
    pub async fn delete(&self, document_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(document_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over document titles, newest first.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE title LIKE $1 ESCAPE '\\' ORDER BY created_at DESC",
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search documents", e))
    }

    /// Count all documents.
    pub async fn count_all(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count documents", e))
    }

    /// Total size of all documents in bytes.
    pub async fn total_size_bytes(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COALESCE(SUM(file_size), 0) FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to calculate storage size", e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabasePool;
    use crate::migration;
    use crate::repositories::folder::FolderRepository;
    use snapdoc_core::config::DatabaseConfig;
    use snapdoc_entity::folder::CreateFolder;

    async fn setup() -> (DocumentRepository, FolderRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("test.db").to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        };
        let db = DatabasePool::create(&config).await.unwrap();
        migration::run(db.pool()).await.unwrap();
        let pool = db.into_pool();
        (
            DocumentRepository::new(pool.clone()),
            FolderRepository::new(pool),
            dir,
        )
    }

    fn sample(title: &str, folder_id: Option<i64>) -> CreateDocument {
        CreateDocument {
            title: title.to_string(),
            file_path: format!("documents/{title}.jpg"),
            thumbnail_path: Some(format!("thumbnails/{title}.jpg")),
            file_size: 1024,
            category: "general".to_string(),
            tags: None,
            folder_id,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_and_roundtrip() {
        let (docs, _folders, _dir) = setup().await;

        let created = docs.create(&sample("invoice", None)).await.unwrap();
        assert_eq!(created.page_count, 1);
        assert!(created.ocr_text.is_none());

        let fetched = docs.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "invoice");
        assert_eq!(fetched.file_size, 1024);
    }

    #[tokio::test]
    async fn test_move_between_folders() {
        let (docs, folders, _dir) = setup().await;

        let folder = folders
            .create(&CreateFolder {
                name: "Inbox".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();
        let doc = docs.create(&sample("scan", None)).await.unwrap();

        let moved = docs.move_to_folder(doc.id, Some(folder.id)).await.unwrap();
        assert_eq!(moved.folder_id, Some(folder.id));
        assert!(docs.find_by_folder(None).await.unwrap().is_empty());
        assert_eq!(docs.find_by_folder(Some(folder.id)).await.unwrap().len(), 1);

        let back = docs.move_to_folder(doc.id, None).await.unwrap();
        assert!(back.folder_id.is_none());
    }

    #[tokio::test]
    async fn test_move_to_missing_folder_is_constraint_violation() {
        let (docs, _folders, _dir) = setup().await;

        let doc = docs.create(&sample("scan", None)).await.unwrap();
        let err = docs.move_to_folder(doc.id, Some(999)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);
    }

    #[tokio::test]
    async fn test_subtree_queries() {
        let (docs, folders, _dir) = setup().await;

        let root = folders
            .create(&CreateFolder {
                name: "Receipts".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();
        let child = folders
            .create(&CreateFolder {
                name: "2024".to_string(),
                parent_id: Some(root.id),
            })
            .await
            .unwrap();

        docs.create(&sample("top", Some(root.id))).await.unwrap();
        docs.create(&sample("nested", Some(child.id))).await.unwrap();
        docs.create(&sample("outside", None)).await.unwrap();

        let in_tree = docs.find_in_folder_tree(root.id).await.unwrap();
        assert_eq!(in_tree.len(), 2);

        let removed = docs.delete_in_folder_tree(root.id).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(docs.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (docs, _folders, _dir) = setup().await;

        docs.create(&sample("Tax Return", None)).await.unwrap();
        docs.create(&sample("Warranty", None)).await.unwrap();

        let hits = docs.search("tax").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Tax Return");
    }

    #[tokio::test]
    async fn test_aggregates() {
        let (docs, _folders, _dir) = setup().await;

        let mut a = sample("a", None);
        a.file_size = 100;
        let mut b = sample("b", None);
        b.file_size = 250;
        docs.create(&a).await.unwrap();
        docs.create(&b).await.unwrap();

        assert_eq!(docs.count_all().await.unwrap(), 2);
        assert_eq!(docs.total_size_bytes().await.unwrap(), 350);
    }
}
