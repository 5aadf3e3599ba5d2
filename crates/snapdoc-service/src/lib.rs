//! # snapdoc-service
//!
//! Business logic for Snapdoc: the [`DocumentStore`] orchestrates the
//! repositories and the injected blob/imaging collaborators to implement
//! every folder and document operation.
//!
//! The store follows constructor injection — all dependencies are provided
//! to [`DocumentStore::initialize`], and the store value only exists once
//! initialization (directory creation + schema migration) has succeeded.

pub mod store;

pub use store::documents::SaveDocumentRequest;
pub use store::stats::StorageStats;
pub use store::DocumentStore;
