//! Blob storage and image-processing configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data (blobs and database file).
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Target width in pixels for normalized document images.
    #[serde(default = "default_document_width")]
    pub document_width: u32,
    /// JPEG quality (1-100) for normalized document images.
    #[serde(default = "default_document_quality")]
    pub document_quality: u8,
    /// Thumbnail width in pixels.
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,
    /// Thumbnail height in pixels.
    #[serde(default = "default_thumbnail_height")]
    pub thumbnail_height: u32,
    /// JPEG quality (1-100) for thumbnails.
    #[serde(default = "default_thumbnail_quality")]
    pub thumbnail_quality: u8,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            document_width: default_document_width(),
            document_quality: default_document_quality(),
            thumbnail_width: default_thumbnail_width(),
            thumbnail_height: default_thumbnail_height(),
            thumbnail_quality: default_thumbnail_quality(),
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_document_width() -> u32 {
    1200
}

fn default_document_quality() -> u8 {
    90
}

fn default_thumbnail_width() -> u32 {
    200
}

fn default_thumbnail_height() -> u32 {
    300
}

fn default_thumbnail_quality() -> u8 {
    70
}
