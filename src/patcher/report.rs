// src/patcher/report.rs
// Issue body: one fenced block per patched dataset, then the raw batch for auditing.

use super::apply::PatchedTable;
use crate::batch::ChangeBatch;
use crate::error::BotResult;

const DATASET_FOOTER: &str = "============================================";
const RAW_BATCH_HEADER: &str = "======== RAW PULL REQUEST ========";
const RAW_BATCH_FOOTER: &str = "==================================";

/// Block for a single dataset's final table.
pub fn render_dataset_block(patched: &PatchedTable) -> String {
    let mut block = format!("======== NEW CHANGES FOR {} ========\n", patched.dataset);
    block.push_str("```\n");
    for line in patched.table.lines() {
        block.push_str(line);
        block.push('\n');
    }
    block.push_str("```\n\n");
    block.push_str("\n\n");
    block.push_str(DATASET_FOOTER);
    block.push_str("\n\n\n");
    block
}

/// Trailing block holding the pretty-printed batch.
pub fn render_audit_block(batch: &ChangeBatch) -> BotResult<String> {
    Ok(format!(
        "\n\n\n{}\n{}\n\n\n{}\n\n\n",
        RAW_BATCH_HEADER,
        batch.to_audit_json()?,
        RAW_BATCH_FOOTER
    ))
}

/// Concatenates every dataset block, in the given order, followed by the audit block.
pub fn render_report(results: &[PatchedTable], batch: &ChangeBatch) -> BotResult<String> {
    let mut report: String = results.iter().map(render_dataset_block).collect();
    report.push_str(&render_audit_block(batch)?);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patcher::Table;
    use pretty_assertions::assert_eq;

    #[test]
    fn dataset_block_layout() {
        let patched = PatchedTable {
            table: Table::from_text("A |\n:-:|\n1 |"),
            dataset: "vision/mnist".parse().unwrap(),
        };
        assert_eq!(
            render_dataset_block(&patched),
            "======== NEW CHANGES FOR vision/mnist ========\n\
             ```\nA |\n:-:|\n1 |\n```\n\n\n\n\
             ============================================\n\n\n"
        );
    }

    #[test]
    fn empty_batch_report_is_audit_only() {
        let report = render_report(&[], &ChangeBatch::default()).unwrap();
        assert_eq!(
            report,
            "\n\n\n======== RAW PULL REQUEST ========\n\
             {\n    \"newColumns\": [],\n    \"newRows\": [],\n    \"changedRows\": [],\n    \"newLeaderboards\": []\n}\
             \n\n\n==================================\n\n\n"
        );
    }

    #[test]
    fn blocks_follow_result_order() {
        let results = vec![
            PatchedTable { table: Table::from_text("B |"), dataset: "z/last".parse().unwrap() },
            PatchedTable { table: Table::from_text("A |"), dataset: "a/first".parse().unwrap() },
        ];
        let report = render_report(&results, &ChangeBatch::default()).unwrap();
        let z = report.find("NEW CHANGES FOR z/last").unwrap();
        let a = report.find("NEW CHANGES FOR a/first").unwrap();
        let raw = report.find("RAW PULL REQUEST").unwrap();
        assert!(z < a && a < raw);
    }
}
