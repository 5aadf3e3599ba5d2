//! Combined folder/document listing command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use snapdoc_core::config::AppConfig;
use snapdoc_core::error::AppError;
use snapdoc_entity::item::ScanItem;

use super::{open_store, OpenMode};
use crate::output::{self, OutputFormat};

/// Arguments for the items command
#[derive(Debug, Args)]
pub struct ItemsArgs {
    /// Folder ID to list (omit for root level)
    #[arg(short = 'F', long)]
    pub folder_id: Option<i64>,
}

/// Mixed listing display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct ItemRow {
    /// Entity kind
    kind: String,
    /// Row ID
    id: i64,
    /// Name or title
    name: String,
}

impl From<&ScanItem> for ItemRow {
    fn from(item: &ScanItem) -> Self {
        Self {
            kind: item.kind().to_string(),
            id: item.id(),
            name: item.label().to_string(),
        }
    }
}

/// Execute the items command
pub async fn execute(
    args: &ItemsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = open_store(config, OpenMode::Existing).await?;

    let items = store.list_items(args.folder_id).await?;
    let rows: Vec<ItemRow> = items.iter().map(ItemRow::from).collect();
    output::print_list(&rows, format);

    Ok(())
}
