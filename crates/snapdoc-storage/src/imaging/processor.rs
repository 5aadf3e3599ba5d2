//! JPEG image processor built on the `image` crate.

use std::io::Cursor;

use async_trait::async_trait;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

use snapdoc_core::error::{AppError, ErrorKind};
use snapdoc_core::result::AppResult;
use snapdoc_core::traits::imaging::{ImageProcessor, NormalizeOptions, ThumbnailOptions};

/// Decodes captures, rescales them, and re-encodes as JPEG.
///
/// Decoding and encoding are CPU-bound, so both operations run under
/// `spawn_blocking`.
#[derive(Debug, Clone, Default)]
pub struct JpegProcessor;

impl JpegProcessor {
    /// Create a new processor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageProcessor for JpegProcessor {
    async fn normalize(&self, data: Bytes, opts: &NormalizeOptions) -> AppResult<Bytes> {
        let opts = *opts;
        let out = tokio::task::spawn_blocking(move || scale_to_width(&data, opts))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Image processing task panicked", e)
            })??;

        debug!(
            target_width = opts.target_width,
            bytes = out.len(),
            "Normalized capture"
        );
        Ok(out)
    }

    async fn thumbnail(&self, data: Bytes, opts: &ThumbnailOptions) -> AppResult<Bytes> {
        let opts = *opts;
        let out = tokio::task::spawn_blocking(move || scale_to_fixed(&data, opts))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Image processing task panicked", e)
            })??;

        debug!(
            target_width = opts.target_width,
            target_height = opts.target_height,
            bytes = out.len(),
            "Generated thumbnail"
        );
        Ok(out)
    }
}

fn decode(data: &[u8]) -> AppResult<DynamicImage> {
    if data.is_empty() {
        return Err(AppError::invalid_argument("Empty image data"));
    }
    image::load_from_memory(data).map_err(|e| {
        AppError::with_source(ErrorKind::InvalidArgument, "Failed to decode image", e)
    })
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> AppResult<Bytes> {
    // JPEG has no alpha channel; flatten before encoding.
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to encode JPEG", e))?;
    Ok(Bytes::from(buf.into_inner()))
}

/// Scale to the target width, preserving aspect ratio. Never upscales.
fn scale_to_width(data: &[u8], opts: NormalizeOptions) -> AppResult<Bytes> {
    let img = decode(data)?;
    let scaled = if img.width() > opts.target_width {
        img.resize(opts.target_width, u32::MAX, FilterType::Lanczos3)
    } else {
        img
    };
    encode_jpeg(&scaled, opts.quality)
}

/// Scale to exact thumbnail dimensions.
fn scale_to_fixed(data: &[u8], opts: ThumbnailOptions) -> AppResult<Bytes> {
    let img = decode(data)?;
    let scaled = img.resize_exact(opts.target_width, opts.target_height, FilterType::Lanczos3);
    encode_jpeg(&scaled, opts.quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn fixture_jpeg(width: u32, height: u32) -> Bytes {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        encode_jpeg(&DynamicImage::ImageRgb8(img), 90).unwrap()
    }

    #[tokio::test]
    async fn test_normalize_scales_down_to_target_width() {
        let processor = JpegProcessor::new();
        let input = fixture_jpeg(800, 600);

        let out = processor
            .normalize(
                input,
                &NormalizeOptions {
                    target_width: 400,
                    quality: 90,
                },
            )
            .await
            .unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.width(), 400);
        assert_eq!(decoded.height(), 300);
    }

    #[tokio::test]
    async fn test_normalize_never_upscales() {
        let processor = JpegProcessor::new();
        let input = fixture_jpeg(300, 200);

        let out = processor
            .normalize(
                input,
                &NormalizeOptions {
                    target_width: 1200,
                    quality: 90,
                },
            )
            .await
            .unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.width(), 300);
        assert_eq!(decoded.height(), 200);
    }

    #[tokio::test]
    async fn test_thumbnail_has_exact_dimensions() {
        let processor = JpegProcessor::new();
        let input = fixture_jpeg(800, 600);

        let out = processor
            .thumbnail(
                input,
                &ThumbnailOptions {
                    target_width: 200,
                    target_height: 300,
                    quality: 70,
                },
            )
            .await
            .unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 300);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let processor = JpegProcessor::new();

        let err = processor
            .normalize(
                Bytes::new(),
                &NormalizeOptions {
                    target_width: 1200,
                    quality: 90,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }
}
