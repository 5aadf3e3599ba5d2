//! CLI command definitions and dispatch.

pub mod doc;
pub mod folder;
pub mod init;
pub mod items;
pub mod search;
pub mod stats;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use snapdoc_core::config::AppConfig;
use snapdoc_core::error::AppError;
use snapdoc_database::connection::DatabasePool;
use snapdoc_service::DocumentStore;
use snapdoc_storage::{JpegProcessor, LocalBlobStore};

use crate::output::OutputFormat;

/// Snapdoc — scanned-document storage and organization
#[derive(Debug, Parser)]
#[command(name = "snapdoc", version, about, long_about = None)]
pub struct Cli {
    /// Configuration profile (merges config/default.toml, config/<profile>.toml
    /// and SNAPDOC_*-prefixed environment variables)
    #[arg(short, long, default_value = "default")]
    pub profile: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the data directory and database, and run migrations
    Init,
    /// Folder management
    Folder(folder::FolderArgs),
    /// Document management
    Doc(doc::DocArgs),
    /// List folders and documents inside a folder
    Items(items::ItemsArgs),
    /// Search folders and documents by name/title
    Search(search::SearchArgs),
    /// Show aggregate storage statistics
    Stats,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Init => init::execute(config).await,
            Commands::Folder(args) => folder::execute(args, config, self.format).await,
            Commands::Doc(args) => doc::execute(args, config, self.format).await,
            Commands::Items(args) => items::execute(args, config, self.format).await,
            Commands::Search(args) => search::execute(args, config, self.format).await,
            Commands::Stats => stats::execute(config, self.format).await,
        }
    }
}

/// Whether a command may create the database or requires an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenMode {
    /// First-time initialization: create the database file if absent.
    Create,
    /// Normal operation: a missing database means `init` never ran.
    Existing,
}

/// Build the fully wired document store.
///
/// This is the single composition point: the pool, the blob store, and the
/// image processor are constructed here and injected into the store.
pub(crate) async fn open_store(
    config: &AppConfig,
    mode: OpenMode,
) -> Result<DocumentStore, AppError> {
    let db = match mode {
        OpenMode::Create => DatabasePool::create(&config.database).await?,
        OpenMode::Existing => DatabasePool::open(&config.database).await?,
    };

    let blobs = Arc::new(LocalBlobStore::new(&config.storage.data_root).await?);
    let imaging = Arc::new(JpegProcessor::new());

    DocumentStore::initialize(&db, blobs, imaging, config.storage.clone()).await
}
