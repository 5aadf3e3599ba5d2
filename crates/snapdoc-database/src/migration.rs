//! Schema bootstrap and the linear migration runner.
//!
//! The schema carries a single monotonically increasing version in the
//! `db_version` table. Base tables are created idempotently on every run;
//! each migration step `N` is applied only while the recorded version is
//! below `N`, and the version record is upserted to `N` afterwards. Steps
//! tolerate partial re-application: a crash after altering the schema but
//! before recording the version must not break the next run.

use sqlx::sqlite::SqlitePool;
use tracing::info;

use snapdoc_core::error::{AppError, ErrorKind};
use snapdoc_core::result::AppResult;

/// The schema version this build migrates up to.
pub const SCHEMA_VERSION: i64 = 2;

/// Bring the database schema to [`SCHEMA_VERSION`].
///
/// Safe to call on every startup; a fully migrated database is a no-op.
pub async fn run(pool: &SqlitePool) -> AppResult<()> {
    create_base_tables(pool).await?;

    let current = current_version(pool).await?;
    info!(
        current_version = current,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    if current < 1 {
        info!("Applying migration 1: document folder assignment");
        add_folder_column(pool).await?;
        set_version(pool, 1).await?;
    }

    if current < 2 {
        info!("Applying migration 2: hierarchy lookup indexes");
        add_lookup_indexes(pool).await?;
        set_version(pool, 2).await?;
    }

    info!("Database schema is up to date");
    Ok(())
}

/// Read the highest recorded schema version; no record means 0.
pub async fn current_version(pool: &SqlitePool) -> AppResult<i64> {
    let version: Option<i64> =
        sqlx::query_scalar("SELECT version FROM db_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to read schema version", e)
            })?;
    Ok(version.unwrap_or(0))
}

async fn set_version(pool: &SqlitePool, version: i64) -> AppResult<()> {
    sqlx::query("INSERT OR REPLACE INTO db_version (version) VALUES ($1)")
        .bind(version)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to record schema version {version}"),
                e,
            )
        })?;
    info!(version, "Schema version recorded");
    Ok(())
}

/// Create the base tables if they are absent.
///
/// The `documents` table is deliberately created without `folder_id`: that
/// column arrives via migration 1, so fresh databases take the same upgrade
/// path as databases predating folder support.
async fn create_base_tables(pool: &SqlitePool) -> AppResult<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS db_version ( \
             version INTEGER PRIMARY KEY \
         )",
        "CREATE TABLE IF NOT EXISTS folders ( \
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             name TEXT NOT NULL, \
             parent_id INTEGER, \
             created_at DATETIME DEFAULT CURRENT_TIMESTAMP, \
             updated_at DATETIME DEFAULT CURRENT_TIMESTAMP, \
             FOREIGN KEY (parent_id) REFERENCES folders (id) ON DELETE CASCADE \
         )",
        "CREATE TABLE IF NOT EXISTS documents ( \
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             title TEXT NOT NULL, \
             file_path TEXT NOT NULL, \
             thumbnail_path TEXT, \
             created_at DATETIME DEFAULT CURRENT_TIMESTAMP, \
             updated_at DATETIME DEFAULT CURRENT_TIMESTAMP, \
             file_size INTEGER, \
             page_count INTEGER DEFAULT 1, \
             category TEXT DEFAULT 'general', \
             tags TEXT, \
             ocr_text TEXT \
         )",
    ];

    for sql in statements {
        sqlx::query(sql).execute(pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create base tables", e)
        })?;
    }
    Ok(())
}

/// Migration 1: attach documents to folders.
///
/// Adding a column is not idempotent in SQLite, so the column list is
/// consulted first; existing rows default to root-level (NULL).
async fn add_folder_column(pool: &SqlitePool) -> AppResult<()> {
    let existing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info('documents') WHERE name = 'folder_id'")
            .fetch_one(pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to inspect documents table", e)
            })?;

    if existing > 0 {
        info!("folder_id column already present; skipping");
        return Ok(());
    }

    sqlx::query(
        "ALTER TABLE documents \
         ADD COLUMN folder_id INTEGER REFERENCES folders (id) ON DELETE SET NULL",
    )
    .execute(pool)
    .await
    .map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to add folder_id column", e)
    })?;
    Ok(())
}

/// Migration 2: indexes for the two hot lookup paths (children of a folder,
/// documents in a folder).
async fn add_lookup_indexes(pool: &SqlitePool) -> AppResult<()> {
    let statements = [
        "CREATE INDEX IF NOT EXISTS idx_documents_folder_id ON documents (folder_id)",
        "CREATE INDEX IF NOT EXISTS idx_folders_parent_id ON folders (parent_id)",
    ];

    for sql in statements {
        sqlx::query(sql).execute(pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create lookup indexes", e)
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabasePool;
    use snapdoc_core::config::DatabaseConfig;

    async fn temp_pool(dir: &tempfile::TempDir) -> DatabasePool {
        let config = DatabaseConfig {
            path: dir.path().join("test.db").to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        };
        DatabasePool::create(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_migrations_reach_target_version() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_pool(&dir).await;

        run(db.pool()).await.unwrap();
        assert_eq!(current_version(db.pool()).await.unwrap(), SCHEMA_VERSION);

        let folder_id_columns: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pragma_table_info('documents') WHERE name = 'folder_id'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(folder_id_columns, 1);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_pool(&dir).await;

        run(db.pool()).await.unwrap();
        run(db.pool()).await.unwrap();

        assert_eq!(current_version(db.pool()).await.unwrap(), SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_partial_step_reapplies_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_pool(&dir).await;

        // Simulate a crash after the schema change but before the version
        // bump: the column exists while db_version still says 0.
        create_base_tables(db.pool()).await.unwrap();
        add_folder_column(db.pool()).await.unwrap();
        assert_eq!(current_version(db.pool()).await.unwrap(), 0);

        run(db.pool()).await.unwrap();
        assert_eq!(current_version(db.pool()).await.unwrap(), SCHEMA_VERSION);
    }
}
