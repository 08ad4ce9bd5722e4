// src/patcher/apply.rs
//! Applying an edit set to one leaderboard.
//!
//! Order is fixed by edit kind: replacement, new columns, new rows, changed rows.
//! The order of kinds in the request does not matter.

use tracing::debug;

use super::grouping::EditSet;
use super::table::Table;
use crate::batch::{ChangeBatch, DatasetId, RowFields, ROW_ID_FIELD};
use crate::error::{BotError, BotResult};
use crate::github::TableSource;

/// Final table of one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedTable {
    pub table: Table,
    pub dataset: DatasetId,
}

/// Row index addressed by a changed row's `id` field.
///
/// A missing or non-numeric id is an error. A numeric id that names no row
/// (fractional, or beyond `i64`) gives `Ok(None)` and is skipped like an
/// out-of-range one.
pub fn changed_row_index(dataset: &DatasetId, row: &RowFields) -> BotResult<Option<i64>> {
    let value = row.get(ROW_ID_FIELD).ok_or_else(|| BotError::MissingRowId {
        dataset: dataset.to_string(),
    })?;
    if !value.is_number() {
        return Err(BotError::InvalidRowId {
            dataset: dataset.to_string(),
            value: serde_json::to_string(value).unwrap_or_else(|_| value.to_string()),
        });
    }
    Ok(value.as_row_index())
}

/// Rejects a batch containing changed rows without a numeric `id`.
///
/// Run before any fetch so a bad row cannot leave some datasets processed.
pub fn validate_batch(batch: &ChangeBatch) -> BotResult<()> {
    for changed in &batch.changed_rows {
        changed_row_index(&changed.dataset, &changed.row)?;
    }
    Ok(())
}

/// Base table for a dataset: the replacement text when one was sent, the
/// stored leaderboard otherwise. The source is not consulted for replaced datasets.
pub async fn load_base(
    source: &dyn TableSource,
    dataset: &DatasetId,
    edits: &EditSet<'_>,
) -> BotResult<Table> {
    match edits.replacement {
        Some(text) => {
            debug!(%dataset, "using replacement leaderboard");
            Ok(Table::from_text(text))
        }
        None => {
            let raw = source.fetch(dataset).await?;
            Ok(Table::from_markdown(&raw))
        }
    }
}

/// Applies columns, then new rows, then changed rows to `table`.
pub fn patch_table(mut table: Table, dataset: &DatasetId, edits: &EditSet<'_>) -> BotResult<Table> {
    for column in &edits.new_columns {
        if !table.add_column(&column.column) {
            return Err(BotError::MalformedTable {
                dataset: dataset.to_string(),
            });
        }
    }

    for row in &edits.new_rows {
        table.push_row(row.cells());
    }

    for row in &edits.changed_rows {
        let id = changed_row_index(dataset, row)?;
        let replaced = id.is_some_and(|index| table.replace_row(index, row.cells()));
        if !replaced {
            debug!(%dataset, ?id, rows = table.data_row_count(), "changed row id out of range, skipped");
        }
    }

    Ok(table)
}

/// Loads the base table for `dataset` and applies every edit in `edits`.
pub async fn apply_edits(
    source: &dyn TableSource,
    dataset: &DatasetId,
    edits: &EditSet<'_>,
) -> BotResult<PatchedTable> {
    let base = load_base(source, dataset, edits).await?;
    let table = patch_table(base, dataset, edits)?;
    debug!(%dataset, edits = edits.edit_count(), lines = table.len(), "edits applied");
    Ok(PatchedTable {
        table,
        dataset: dataset.clone(),
    })
}
