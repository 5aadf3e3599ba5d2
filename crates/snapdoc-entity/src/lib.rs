//! # snapdoc-entity
//!
//! Domain entity models for Snapdoc. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod document;
pub mod folder;
pub mod item;

pub use document::{CreateDocument, Document, UpdateDocument};
pub use folder::{CreateFolder, Folder};
pub use item::ScanItem;
