//! First-time initialization command.

use snapdoc_core::config::AppConfig;
use snapdoc_core::error::AppError;

use super::{open_store, OpenMode};
use crate::output;

/// Execute `snapdoc init`.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    open_store(config, OpenMode::Create).await?;

    output::print_success(&format!(
        "Initialized Snapdoc store at {} (database: {})",
        config.storage.data_root, config.database.path
    ));
    Ok(())
}
