//! # snapdoc-database
//!
//! SQLite connection management, the schema migration runner, and concrete
//! repository implementations for the Snapdoc entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
