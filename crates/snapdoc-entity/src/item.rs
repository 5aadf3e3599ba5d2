//! Mixed listing items.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::folder::Folder;

/// A folder or document tagged with its entity kind.
///
/// Combined listings and search results return this so a mixed list can be
/// rendered or filtered without a schema lookup; the serialized form carries
/// a `"kind"` discriminator of `"folder"` or `"document"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScanItem {
    /// A folder entry.
    Folder(Folder),
    /// A document entry.
    Document(Document),
}

impl ScanItem {
    /// The entity kind tag as a string.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Folder(_) => "folder",
            Self::Document(_) => "document",
        }
    }

    /// The row ID of the wrapped entity.
    pub fn id(&self) -> i64 {
        match self {
            Self::Folder(f) => f.id,
            Self::Document(d) => d.id,
        }
    }

    /// The display label: folder name or document title.
    pub fn label(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::Document(d) => &d.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_kind_tag_serialization() {
        let item = ScanItem::Folder(Folder {
            id: 3,
            name: "Taxes".to_string(),
            parent_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "folder");
        assert_eq!(json["name"], "Taxes");
        assert_eq!(item.kind(), "folder");
        assert_eq!(item.label(), "Taxes");
    }
}
