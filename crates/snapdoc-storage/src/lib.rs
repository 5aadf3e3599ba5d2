//! # snapdoc-storage
//!
//! Concrete collaborator implementations for the document store: the local
//! filesystem blob provider and the JPEG image processor.

pub mod imaging;
pub mod providers;

pub use imaging::JpegProcessor;
pub use providers::LocalBlobStore;
