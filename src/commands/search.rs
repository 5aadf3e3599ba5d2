//! Global search command.

use clap::Args;

use snapdoc_core::config::AppConfig;
use snapdoc_core::error::AppError;

use super::items::ItemRow;
use super::{open_store, OpenMode};
use crate::output::{self, OutputFormat};

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Substring to match against folder names and document titles
    pub query: String,
}

/// Execute the search command
pub async fn execute(
    args: &SearchArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = open_store(config, OpenMode::Existing).await?;

    let items = store.search(&args.query).await?;
    let rows: Vec<ItemRow> = items.iter().map(ItemRow::from).collect();
    output::print_list(&rows, format);

    Ok(())
}
