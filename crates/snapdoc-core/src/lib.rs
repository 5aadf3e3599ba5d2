//! # snapdoc-core
//!
//! Core crate for Snapdoc. Contains the collaborator traits, configuration
//! schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Snapdoc crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
