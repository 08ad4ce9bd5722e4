// src/batch/mod.rs
//! Wire types for an incoming change batch.

mod dataset_id;
mod row_fields;

pub use dataset_id::DatasetId;
pub use row_fields::{format_float, CellValue, RowFields, ROW_ID_FIELD};

use serde::{Deserialize, Serialize};

use crate::error::BotResult;
use crate::json_text;

/// A new column appended to a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewColumn {
    pub dataset: DatasetId,
    pub column: String,
    /// Accepted and echoed in the audit dump; does not change cell formatting.
    pub numerical: bool,
}

/// A row appended after the existing data rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRow {
    pub dataset: DatasetId,
    pub row: RowFields,
}

/// A replacement for the data row addressed by `row["id"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedRow {
    pub dataset: DatasetId,
    pub row: RowFields,
}

/// Full table text that replaces a leaderboard before other edits apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLeaderboard {
    pub dataset: DatasetId,
    pub data: String,
}

/// Everything submitted in one request, across any number of datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeBatch {
    pub new_columns: Vec<NewColumn>,
    pub new_rows: Vec<NewRow>,
    pub changed_rows: Vec<ChangedRow>,
    pub new_leaderboards: Vec<NewLeaderboard>,
}

impl ChangeBatch {
    pub fn is_empty(&self) -> bool {
        self.new_columns.is_empty()
            && self.new_rows.is_empty()
            && self.changed_rows.is_empty()
            && self.new_leaderboards.is_empty()
    }

    /// Total number of edits of all kinds.
    pub fn edit_count(&self) -> usize {
        self.new_columns.len()
            + self.new_rows.len()
            + self.changed_rows.len()
            + self.new_leaderboards.len()
    }

    /// Pretty JSON with four-space indentation, used for the audit block of a report.
    pub fn to_audit_json(&self) -> BotResult<String> {
        json_text::to_indented(self)
    }
}
