//! Collaborator traits consumed by the document store.

pub mod blob;
pub mod imaging;

pub use blob::{BlobMeta, BlobStore};
pub use imaging::{ImageProcessor, NormalizeOptions, ThumbnailOptions};
