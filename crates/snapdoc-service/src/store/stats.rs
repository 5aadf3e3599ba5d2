//! Aggregate storage statistics.

use serde::{Deserialize, Serialize};

use snapdoc_core::result::AppResult;

use super::DocumentStore;

/// Aggregate statistics across all documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageStats {
    /// Number of stored documents.
    pub document_count: i64,
    /// Sum of all document sizes in bytes.
    pub total_size_bytes: i64,
    /// The byte sum as megabytes, rounded to two decimals for display.
    pub total_size_mb: f64,
}

impl DocumentStore {
    /// Document count and total stored bytes across all folders.
    pub async fn storage_stats(&self) -> AppResult<StorageStats> {
        let document_count = self.documents.count_all().await?;
        let total_size_bytes = self.documents.total_size_bytes().await?;

        Ok(StorageStats {
            document_count,
            total_size_bytes,
            total_size_mb: to_megabytes(total_size_bytes),
        })
    }
}

fn to_megabytes(bytes: i64) -> f64 {
    (bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_megabytes_rounds_to_two_decimals() {
        assert_eq!(to_megabytes(0), 0.0);
        assert_eq!(to_megabytes(1024 * 1024), 1.0);
        assert_eq!(to_megabytes(1_572_864), 1.5);
        assert_eq!(to_megabytes(123_456), 0.12);
    }
}
