//! DOT description of a call graph, consumed by the graph layout renderer.

use super::model::{Graph, Node};
use super::shorten::shorten_function_name;
use crate::measurement::ValueFormatter;
use std::fmt::Write;

const BASE_FONT_SIZE: f64 = 8.0;
const MAX_FONT_GROWTH: f64 = 16.0;

/// Presentation settings for `compose_dot`
#[derive(Debug, Clone, Default)]
pub struct DotConfig {
    pub title: String,
    /// Lines shown in the legend box; empty hides the legend
    pub legend: Vec<String>,
    pub total: i64,
    pub formatter: ValueFormatter,
}

/// Build the DOT description of `graph`
pub fn compose_dot(graph: &Graph, config: &DotConfig) -> String {
    let mut out = String::new();
    let title = if config.title.is_empty() {
        "unnamed"
    } else {
        config.title.as_str()
    };

    let _ = writeln!(out, "digraph \"{}\" {{", escape(title));
    out.push_str("node [style=filled fillcolor=\"#f8f8f8\"]\n");

    if !config.legend.is_empty() {
        let label = config
            .legend
            .iter()
            .map(|l| escape(l))
            .collect::<Vec<_>>()
            .join("\\l");
        let _ = writeln!(
            out,
            "subgraph cluster_L {{ \"{}\" [shape=box fontsize=16 label=\"{}\\l\" tooltip=\"{}\"] }}",
            escape(title),
            label,
            escape(title)
        );
    }

    let max_flat = graph
        .iter()
        .map(|(_, n)| n.flat_value().unsigned_abs())
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    for (id, n) in graph.iter() {
        let _ = writeln!(
            out,
            "{} [label=\"{}\" id=\"node{}\" fontsize={} shape=box tooltip=\"{}\"]",
            id,
            node_label(n, config),
            id.index() + 1,
            font_size(n, max_flat),
            escape(&format!(
                "{} ({})",
                n.info.printable_name(),
                config.formatter.format_value(n.cum_value())
            )),
        );
    }

    for (_, n) in graph.iter() {
        for e in &n.outbound {
            let weight = e.weight_value();
            let mut label = format!(" {}", config.formatter.format_value(weight));
            if e.inline {
                label.push_str("\\n (inline)");
            }
            let mut attrs = format!(
                "label=\"{}\" weight={} penwidth={}",
                label,
                edge_weight(weight, config.total),
                pen_width(weight, config.total)
            );
            if e.residual {
                attrs.push_str(" style=\"dotted\"");
            }
            let _ = writeln!(out, "{} -> {} [{}]", e.src, e.dest, attrs);
        }
    }

    out.push_str("}\n");
    out
}

fn node_label(n: &Node, config: &DotConfig) -> String {
    let name = escape(&shorten_function_name(&n.info.printable_name()));
    let flat = n.flat_value();
    let cum = n.cum_value();
    let f = &config.formatter;

    let mut label = format!(
        "{}\\n{} ({})",
        name,
        f.format_value(flat),
        f.percentage(flat, config.total)
    );
    if cum != flat {
        let _ = write!(
            label,
            "\\nof {} ({})",
            f.format_value(cum),
            f.percentage(cum, config.total)
        );
    }
    label
}

fn font_size(n: &Node, max_flat: f64) -> i64 {
    let growth = MAX_FONT_GROWTH * (n.flat_value().unsigned_abs() as f64 / max_flat).sqrt();
    (BASE_FONT_SIZE + growth.ceil()) as i64
}

// Ratios are taken in i128; 100 * weight overflows i64 for large profiles.
fn edge_weight(weight: i64, total: i64) -> i64 {
    let ratio = 100 * i128::from(weight.unsigned_abs()) / i128::from(total.unsigned_abs().max(1));
    i64::try_from(ratio + 1).unwrap_or(i64::MAX)
}

fn pen_width(weight: i64, total: i64) -> i64 {
    if total == 0 {
        return 1;
    }
    let ratio = 5 * i128::from(weight.unsigned_abs()) / i128::from(total.unsigned_abs());
    (1 + ratio).min(6) as i64
}

/// Escape a string for use inside a quoted DOT id or label
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
