// src/patcher/grouping.rs
// Splits a change batch into per-dataset edit sets.

use crate::batch::{ChangeBatch, DatasetId, NewColumn, RowFields};

/// All edits that target one dataset, borrowed from the batch.
///
/// Each list keeps the order the edits arrived in.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EditSet<'a> {
    /// Full table text that replaces the stored leaderboard. Last one wins.
    pub replacement: Option<&'a str>,
    pub new_columns: Vec<&'a NewColumn>,
    pub new_rows: Vec<&'a RowFields>,
    pub changed_rows: Vec<&'a RowFields>,
}

impl EditSet<'_> {
    pub fn edit_count(&self) -> usize {
        usize::from(self.replacement.is_some())
            + self.new_columns.len()
            + self.new_rows.len()
            + self.changed_rows.len()
    }
}

/// Edit sets keyed by dataset, in order of first appearance.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupedEdits<'a> {
    groups: Vec<(&'a DatasetId, EditSet<'a>)>,
}

impl<'a> GroupedEdits<'a> {
    fn entry(&mut self, dataset: &'a DatasetId) -> &mut EditSet<'a> {
        let pos = match self.groups.iter().position(|(id, _)| *id == dataset) {
            Some(pos) => pos,
            None => {
                self.groups.push((dataset, EditSet::default()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[pos].1
    }

    pub fn get(&self, dataset: &DatasetId) -> Option<&EditSet<'a>> {
        self.groups
            .iter()
            .find(|(id, _)| *id == dataset)
            .map(|(_, edits)| edits)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn datasets(&self) -> impl Iterator<Item = &'a DatasetId> + '_ {
        self.groups.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a DatasetId, &EditSet<'a>)> {
        self.groups.iter().map(|(id, edits)| (*id, edits))
    }
}

/// Buckets are created while scanning replacements, then columns, then new
/// rows, then changed rows.
pub fn group_by_dataset(batch: &ChangeBatch) -> GroupedEdits<'_> {
    let mut grouped = GroupedEdits::default();
    for leaderboard in &batch.new_leaderboards {
        grouped.entry(&leaderboard.dataset).replacement = Some(leaderboard.data.as_str());
    }
    for column in &batch.new_columns {
        grouped.entry(&column.dataset).new_columns.push(column);
    }
    for row in &batch.new_rows {
        grouped.entry(&row.dataset).new_rows.push(&row.row);
    }
    for changed in &batch.changed_rows {
        grouped.entry(&changed.dataset).changed_rows.push(&changed.row);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> ChangeBatch {
        serde_json::from_str(
            r#"{
                "newColumns": [
                    {"dataset": "b/two", "column": "X", "numerical": false},
                    {"dataset": "a/one", "column": "Y", "numerical": true}
                ],
                "newRows": [{"dataset": "c/three", "row": {"v": 1}}],
                "changedRows": [{"dataset": "a/one", "row": {"id": 0, "v": 2}}],
                "newLeaderboards": [
                    {"dataset": "a/one", "data": "first"},
                    {"dataset": "a/one", "data": "second"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn groups_in_scan_order() {
        let batch = batch();
        let grouped = group_by_dataset(&batch);
        let order: Vec<String> = grouped.datasets().map(|d| d.to_string()).collect();
        assert_eq!(order, vec!["a/one", "b/two", "c/three"]);
    }

    #[test]
    fn last_replacement_wins() {
        let batch = batch();
        let grouped = group_by_dataset(&batch);
        let a = grouped.get(&"a/one".parse().unwrap()).unwrap();
        assert_eq!(a.replacement, Some("second"));
        assert_eq!(a.new_columns.len(), 1);
        assert_eq!(a.changed_rows.len(), 1);
        assert_eq!(a.edit_count(), 3);
    }

    #[test]
    fn datasets_without_replacement_have_none() {
        let batch = batch();
        let grouped = group_by_dataset(&batch);
        let c = grouped.get(&"c/three".parse().unwrap()).unwrap();
        assert_eq!(c.replacement, None);
        assert_eq!(c.new_rows.len(), 1);
    }

    #[test]
    fn empty_batch_groups_nothing() {
        assert!(group_by_dataset(&ChangeBatch::default()).is_empty());
    }
}
