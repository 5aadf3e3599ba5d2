//! Image processor trait for turning raw captures into scanned documents.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Options for normalizing a full-size capture.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    /// Target width in pixels; height follows the source aspect ratio.
    pub target_width: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
}

/// Options for deriving a thumbnail.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailOptions {
    /// Thumbnail width in pixels.
    pub target_width: u32,
    /// Thumbnail height in pixels.
    pub target_height: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
}

/// Trait for image post-processing backends.
///
/// Both operations take raw image bytes and return re-encoded JPEG bytes;
/// the caller decides where the output lands. Implementations live in
/// `snapdoc-storage`.
#[async_trait]
pub trait ImageProcessor: Send + Sync + std::fmt::Debug + 'static {
    /// Normalize a capture into the fixed document format: scale to the
    /// target width and re-encode as compressed JPEG.
    async fn normalize(&self, data: Bytes, opts: &NormalizeOptions) -> AppResult<Bytes>;

    /// Derive a fixed-size thumbnail from an already-normalized image.
    async fn thumbnail(&self, data: Bytes, opts: &ThumbnailOptions) -> AppResult<Bytes>;
}
