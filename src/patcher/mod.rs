// src/patcher/mod.rs
//! Turns a change batch into patched leaderboard tables and an issue report.

mod apply;
mod grouping;
mod report;
mod table;

pub use apply::{apply_edits, changed_row_index, load_base, patch_table, validate_batch, PatchedTable};
pub use grouping::{group_by_dataset, EditSet, GroupedEdits};
pub use report::{render_audit_block, render_dataset_block, render_report};
pub use table::{render_row, strip_front_matter, Table, FIRST_DATA_LINE, FRONT_MATTER_DELIMITER};
