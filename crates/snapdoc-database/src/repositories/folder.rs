//! Folder repository implementation.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use snapdoc_core::error::{AppError, ErrorKind};
use snapdoc_core::result::AppResult;
use snapdoc_entity::folder::{CreateFolder, Folder};

use super::like_pattern;

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List direct children of a folder, name ascending.
    ///
    /// `None` lists root-level folders.
    pub async fn find_children(&self, parent_id: Option<i64>) -> AppResult<Vec<Folder>> {
        let query = match parent_id {
            Some(parent) => sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE parent_id = $1 ORDER BY name ASC",
            )
            .bind(parent),
            None => sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE parent_id IS NULL ORDER BY name ASC",
            ),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// IDs of a folder and every folder below it.
    pub async fn find_subtree_ids(&self, folder_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "WITH RECURSIVE tree (id) AS ( \
                 SELECT id FROM folders WHERE id = $1 \
                 UNION ALL \
                 SELECT f.id FROM folders f INNER JOIN tree t ON f.parent_id = t.id \
             ) SELECT id FROM tree",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve folder subtree", e)
        })
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, parent_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::constraint(format!(
                    "Parent folder {:?} does not exist",
                    data.parent_id
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })
    }

    /// Rename a folder, refreshing its update time.
    pub async fn rename(&self, folder_id: i64, new_name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(folder_id)
        .bind(new_name)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Delete a folder row (cascades to descendant folders).
    ///
    /// Returns whether a row was actually removed.
    pub async fn delete(&self, folder_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(folder_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over folder names, name ascending.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE name LIKE $1 ESCAPE '\\' ORDER BY name ASC",
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search folders", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabasePool;
    use crate::migration;
    use snapdoc_core::config::DatabaseConfig;

    async fn setup() -> (FolderRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("test.db").to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        };
        let db = DatabasePool::create(&config).await.unwrap();
        migration::run(db.pool()).await.unwrap();
        (FolderRepository::new(db.into_pool()), dir)
    }

    #[tokio::test]
    async fn test_create_and_list_children_sorted() {
        let (repo, _dir) = setup().await;

        for name in ["Work", "Archive", "Personal"] {
            repo.create(&CreateFolder {
                name: name.to_string(),
                parent_id: None,
            })
            .await
            .unwrap();
        }

        let roots = repo.find_children(None).await.unwrap();
        let names: Vec<_> = roots.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Archive", "Personal", "Work"]);
    }

    #[tokio::test]
    async fn test_create_with_dangling_parent_is_constraint_violation() {
        let (repo, _dir) = setup().await;

        let err = repo
            .create(&CreateFolder {
                name: "Orphan".to_string(),
                parent_id: Some(999),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);
    }

    #[tokio::test]
    async fn test_rename_missing_folder_is_not_found() {
        let (repo, _dir) = setup().await;

        let err = repo.rename(42, "Anything").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_subtree_ids_cover_all_depths() {
        let (repo, _dir) = setup().await;

        let root = repo
            .create(&CreateFolder {
                name: "Receipts".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();
        let child = repo
            .create(&CreateFolder {
                name: "2024".to_string(),
                parent_id: Some(root.id),
            })
            .await
            .unwrap();
        let grandchild = repo
            .create(&CreateFolder {
                name: "Q1".to_string(),
                parent_id: Some(child.id),
            })
            .await
            .unwrap();

        let mut ids = repo.find_subtree_ids(root.id).await.unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![root.id, child.id, grandchild.id]);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_descendants() {
        let (repo, _dir) = setup().await;

        let root = repo
            .create(&CreateFolder {
                name: "Receipts".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();
        let child = repo
            .create(&CreateFolder {
                name: "2024".to_string(),
                parent_id: Some(root.id),
            })
            .await
            .unwrap();

        assert!(repo.delete(root.id).await.unwrap());
        assert!(repo.find_by_id(child.id).await.unwrap().is_none());
        assert!(!repo.delete(root.id).await.unwrap());
    }
}
