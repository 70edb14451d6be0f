//! Reports: a source graph shaped, ranked and trimmed for one view.
//!
//! This module handles:
//! - Request configuration per view (`ReportRequest`)
//! - Report generation with collected diagnostics
//! - The ranked flat list behind the top table (`text_items`)

pub mod generate;
pub mod request;
pub mod top;

use crate::graph::{DotConfig, Forest, Graph};
use crate::measurement::{percentage, ValueFormatter};
use chrono::{DateTime, Utc};

// Re-export main types and functions
pub use generate::generate_report;
pub use request::{ReportRequest, Shape, SortOrder};
pub use top::{text_items, TopEntry};

/// Profile-level settings that travel with every report
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub sample_type: String,
    pub sample_unit: String,
    /// `"auto"` or a fixed unit for formatted values
    pub output_unit: String,
    /// Overrides the sum of flat values as the percentage base
    pub total: Option<i64>,
    /// When the profile was collected
    pub time: Option<DateTime<Utc>>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            sample_type: String::new(),
            sample_unit: "count".to_string(),
            output_unit: "auto".to_string(),
            total: None,
            time: None,
        }
    }
}

/// A graph prepared for one output view
#[derive(Debug, Clone)]
pub struct Report {
    pub graph: Graph,
    /// Percentage base for every formatted value
    pub total: i64,
    pub options: ReportOptions,
    pub shape: Shape,
    pub dropped_nodes: usize,
    pub dropped_edges: usize,
}

impl Report {
    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.options.sample_unit.clone())
            .with_output_unit(self.options.output_unit.clone())
    }

    /// The report graph as a call tree.
    ///
    /// `None` unless the report was generated with `Shape::Tree`.
    pub fn forest(&self) -> Option<Forest<'_>> {
        match self.shape {
            Shape::Tree => Some(Forest::assume(&self.graph)),
            Shape::Flat => None,
        }
    }

    /// Settings for composing the DOT description of this report
    pub fn dot_config(&self) -> DotConfig {
        DotConfig {
            title: self.options.title.clone(),
            legend: self.legend(),
            total: self.total,
            formatter: self.formatter(),
        }
    }

    /// Header lines describing the report
    pub fn legend(&self) -> Vec<String> {
        let f = self.formatter();
        let mut lines = Vec::new();

        if !self.options.title.is_empty() {
            lines.push(format!("File: {}", self.options.title));
        }
        if !self.options.sample_type.is_empty() {
            lines.push(format!("Type: {}", self.options.sample_type));
        }
        if let Some(time) = self.options.time {
            lines.push(format!("Time: {}", time.format("%b %-d, %Y at %-I:%M%P (UTC)")));
        }

        let shown = self.graph.total_flat();
        lines.push(format!(
            "Showing nodes accounting for {}, {} of {} total",
            f.format_value(shown),
            percentage(shown, self.total),
            f.format_value(self.total)
        ));
        if self.dropped_nodes > 0 {
            lines.push(format!("Dropped {} nodes", self.dropped_nodes));
        }
        if self.dropped_edges > 0 {
            lines.push(format!("Dropped {} edges", self.dropped_edges));
        }
        lines
    }
}
