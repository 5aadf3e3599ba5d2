//! SQLite connection pool management.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::info;

use snapdoc_core::config::DatabaseConfig;
use snapdoc_core::error::{AppError, ErrorKind};

/// Wrapper around the sqlx SQLite connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// The underlying sqlx connection pool.
    pool: SqlitePool,
}

impl DatabasePool {
    /// Create the database file if necessary and connect to it.
    ///
    /// Used by first-time initialization; parent directories are created
    /// as needed.
    pub async fn create(config: &DatabaseConfig) -> Result<Self, AppError> {
        if let Some(parent) = Path::new(&config.path).parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create database directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Self::connect(config, true).await
    }

    /// Connect to an existing database file.
    ///
    /// Refuses to create the file: a missing database means the store was
    /// never initialized, which is surfaced as [`ErrorKind::NotInitialized`].
    pub async fn open(config: &DatabaseConfig) -> Result<Self, AppError> {
        if !Path::new(&config.path).exists() {
            return Err(AppError::not_initialized(format!(
                "Database '{}' does not exist; run `snapdoc init` first",
                config.path
            )));
        }
        Self::connect(config, false).await
    }

    async fn connect(config: &DatabaseConfig, create_if_missing: bool) -> Result<Self, AppError> {
        info!(
            path = %config.path,
            max_connections = config.max_connections,
            "Connecting to SQLite"
        );

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(config.busy_timeout_seconds))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Return the underlying sqlx pool (consuming self).
    pub fn into_pool(self) -> SqlitePool {
        self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(path: &Path) -> DatabaseConfig {
        DatabaseConfig {
            path: path.to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("test.db"));

        let created = DatabasePool::create(&config).await.unwrap();
        assert!(created.health_check().await.unwrap());
        created.close().await;

        let reopened = DatabasePool::open(&config).await.unwrap();
        assert!(reopened.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_open_missing_database_is_not_initialized() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("missing.db"));

        let err = DatabasePool::open(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotInitialized);
    }
}
