//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A folder in the document hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier, store-assigned.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root-level folders).
    pub parent_id: Option<i64>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root-level).
    pub parent_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_root() {
        let folder = Folder {
            id: 1,
            name: "Receipts".to_string(),
            parent_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(folder.is_root());

        let child = Folder {
            parent_id: Some(1),
            ..folder
        };
        assert!(!child.is_root());
    }
}
