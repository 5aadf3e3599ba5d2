//! Image processing implementations.

pub mod processor;

pub use processor::JpegProcessor;
