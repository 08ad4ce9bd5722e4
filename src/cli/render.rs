// src/cli/render.rs
// Offline preview of the issue body for a batch file.

use std::path::Path;

use crate::batch::ChangeBatch;
use crate::config::BotConfig;
use crate::error::BotResult;
use crate::github::{DirectoryTableSource, GithubRawSource};
use crate::service::build_report;

/// Renders the report for the batch stored at `batch_path`.
///
/// Tables come from `tables_dir` when given, from the configured repository otherwise.
pub async fn render_file(
    config: &BotConfig,
    batch_path: &Path,
    tables_dir: Option<&Path>,
) -> BotResult<String> {
    let raw = tokio::fs::read_to_string(batch_path).await?;
    let batch: ChangeBatch = serde_json::from_str(&raw)?;
    match tables_dir {
        Some(dir) => build_report(&DirectoryTableSource::new(dir), &batch).await,
        None => build_report(&GithubRawSource::new(config)?, &batch).await,
    }
}

pub async fn run(config: &BotConfig, batch_path: &Path, tables_dir: Option<&Path>) -> BotResult<()> {
    let report = render_file(config, batch_path, tables_dir).await?;
    print!("{}", report);
    Ok(())
}
