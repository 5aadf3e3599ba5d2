//! Document management CLI commands.

use std::path::PathBuf;

use bytes::Bytes;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use snapdoc_core::config::AppConfig;
use snapdoc_core::error::AppError;
use snapdoc_entity::document::{Document, UpdateDocument};
use snapdoc_service::SaveDocumentRequest;

use super::{open_store, OpenMode};
use crate::output::{self, OutputFormat};

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocArgs {
    /// Document subcommand
    #[command(subcommand)]
    pub command: DocCommand,
}

/// Document subcommands
#[derive(Debug, Subcommand)]
pub enum DocCommand {
    /// Save a captured image as a new document
    Save {
        /// Path to the capture (JPEG/PNG)
        image: PathBuf,
        /// Document title (defaults to the capture date)
        #[arg(short, long)]
        title: Option<String>,
        /// Category tag
        #[arg(short, long)]
        category: Option<String>,
        /// Target folder ID (omit for root level)
        #[arg(short = 'F', long)]
        folder_id: Option<i64>,
    },
    /// List documents (root level unless --folder-id is given)
    List {
        /// Folder ID
        #[arg(short = 'F', long)]
        folder_id: Option<i64>,
        /// List every document regardless of folder
        #[arg(short, long)]
        all: bool,
    },
    /// Show a single document
    Show {
        /// Document ID
        id: i64,
    },
    /// Move a document to another folder
    Move {
        /// Document ID
        id: i64,
        /// Target folder ID (omit to move to root level)
        #[arg(short = 'F', long)]
        folder_id: Option<i64>,
    },
    /// Overwrite a document's title, category, and tags
    Update {
        /// Document ID
        id: i64,
        /// New title
        #[arg(short, long)]
        title: String,
        /// New category
        #[arg(short, long)]
        category: String,
        /// New tags (omit to clear)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a document and its blobs
    Delete {
        /// Document ID
        id: i64,
    },
}

/// Document display row
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    /// Document ID
    id: i64,
    /// Title
    title: String,
    /// Category
    category: String,
    /// Folder
    folder: String,
    /// Size in kilobytes
    size_kb: String,
    /// Created at
    created_at: String,
}

impl From<&Document> for DocumentRow {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title.clone(),
            category: doc.category.clone(),
            folder: doc
                .folder_id
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            size_kb: format!("{:.1}", doc.file_size as f64 / 1024.0),
            created_at: doc.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute document commands
pub async fn execute(
    args: &DocArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = open_store(config, OpenMode::Existing).await?;

    match &args.command {
        DocCommand::Save {
            image,
            title,
            category,
            folder_id,
        } => {
            let data = tokio::fs::read(image).await.map_err(|e| {
                AppError::with_source(
                    snapdoc_core::error::ErrorKind::Storage,
                    format!("Failed to read capture: {}", image.display()),
                    e,
                )
            })?;

            let doc = store
                .save_document(SaveDocumentRequest {
                    image: Bytes::from(data),
                    title: title.clone(),
                    category: category.clone(),
                    folder_id: *folder_id,
                })
                .await?;

            output::print_success(&format!("Saved document '{}' (id {})", doc.title, doc.id));
        }
        DocCommand::List { folder_id, all } => {
            let docs = if *all {
                store.list_all_documents().await?
            } else {
                store.list_documents(*folder_id).await?
            };
            let rows: Vec<DocumentRow> = docs.iter().map(DocumentRow::from).collect();
            output::print_list(&rows, format);
        }
        DocCommand::Show { id } => {
            let doc = store.get_document(*id).await?;
            output::print_item(&doc, format);
        }
        DocCommand::Move { id, folder_id } => {
            let doc = store.move_document(*id, *folder_id).await?;
            match doc.folder_id {
                Some(folder) => {
                    output::print_success(&format!("Moved document {id} to folder {folder}"))
                }
                None => output::print_success(&format!("Moved document {id} to root level")),
            }
        }
        DocCommand::Update {
            id,
            title,
            category,
            tags,
        } => {
            let doc = store
                .update_document(
                    *id,
                    UpdateDocument {
                        title: title.clone(),
                        category: category.clone(),
                        tags: tags.clone(),
                    },
                )
                .await?;
            output::print_success(&format!("Updated document {} ('{}')", id, doc.title));
        }
        DocCommand::Delete { id } => {
            if store.delete_document(*id).await? {
                output::print_success(&format!("Deleted document {id}"));
            } else {
                output::print_warning(&format!("Document {id} does not exist"));
            }
        }
    }

    Ok(())
}
