//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use snapdoc_core::config::AppConfig;
use snapdoc_core::error::AppError;
use snapdoc_entity::folder::Folder;

use super::{open_store, OpenMode};
use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List folders (root level unless --parent-id is given)
    List {
        /// Parent folder ID
        #[arg(short, long)]
        parent_id: Option<i64>,
    },
    /// Create a new folder
    Create {
        /// Folder name
        name: String,
        /// Parent folder ID (omit for root level)
        #[arg(short, long)]
        parent_id: Option<i64>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a folder and everything inside it
    Delete {
        /// Folder ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: i64,
    /// Name
    name: String,
    /// Parent
    parent: String,
    /// Created at
    created_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
            parent: folder
                .parent_id
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            created_at: folder.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = open_store(config, OpenMode::Existing).await?;

    match &args.command {
        FolderCommand::List { parent_id } => {
            let folders = store.list_folders(*parent_id).await?;
            let rows: Vec<FolderRow> = folders.iter().map(FolderRow::from).collect();
            output::print_list(&rows, format);
        }
        FolderCommand::Create { name, parent_id } => {
            let folder = store.create_folder(name, *parent_id).await?;
            output::print_success(&format!("Created folder '{}' (id {})", folder.name, folder.id));
        }
        FolderCommand::Rename { id, name } => {
            let folder = store.rename_folder(*id, name).await?;
            output::print_success(&format!("Renamed folder {} to '{}'", id, folder.name));
        }
        FolderCommand::Delete { id, yes } => {
            if !yes {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete folder {id} and every folder/document inside it?"
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
                if !confirmed {
                    output::print_warning("Aborted");
                    return Ok(());
                }
            }

            if store.delete_folder(*id).await? {
                output::print_success(&format!("Deleted folder {id}"));
            } else {
                output::print_warning(&format!("Folder {id} does not exist"));
            }
        }
    }

    Ok(())
}
