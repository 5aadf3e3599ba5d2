//! Aggregate statistics command.

use serde::Serialize;
use tabled::Tabled;

use snapdoc_core::config::AppConfig;
use snapdoc_core::error::AppError;

use super::{open_store, OpenMode};
use crate::output::{self, OutputFormat};

/// Stats display row
#[derive(Debug, Serialize, Tabled)]
struct StatsRow {
    /// Number of documents
    documents: i64,
    /// Total stored bytes
    total_bytes: i64,
    /// Total stored megabytes
    total_mb: f64,
}

/// Execute the stats command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let store = open_store(config, OpenMode::Existing).await?;

    let stats = store.storage_stats().await?;
    let rows = [StatsRow {
        documents: stats.document_count,
        total_bytes: stats.total_size_bytes,
        total_mb: stats.total_size_mb,
    }];
    output::print_list(&rows, format);

    Ok(())
}
