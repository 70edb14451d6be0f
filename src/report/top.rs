//! Ranked flat list of report nodes for the top table.

use super::Report;
use serde::{Deserialize, Serialize};

/// One row of the top table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopEntry {
    pub name: String,
    /// `(inline)` or `(partial-inline)` when callers inlined this node
    pub inline_label: String,
    pub flat: i64,
    pub cum: i64,
    pub flat_format: String,
    pub cum_format: String,
}

/// Rows for every node of the report, in report order
pub fn text_items(report: &Report) -> Vec<TopEntry> {
    let f = report.formatter();

    report
        .graph
        .iter()
        .map(|(_, n)| {
            let inline = n.inbound.iter().any(|e| e.inline);
            let noinline = n.inbound.iter().any(|e| !e.inline);
            let inline_label = match (inline, noinline) {
                (true, true) => "(partial-inline)",
                (true, false) => "(inline)",
                _ => "",
            };

            TopEntry {
                name: n.info.printable_name(),
                inline_label: inline_label.to_string(),
                flat: n.flat_value(),
                cum: n.cum_value(),
                flat_format: f.format_value(n.flat_value()),
                cum_format: f.format_value(n.cum_value()),
            }
        })
        .collect()
}
