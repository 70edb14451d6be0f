//! Terminal rendering of the top table.

use crate::measurement::percentage;
use crate::report::TopEntry;

const NAME_WIDTH: usize = 48;

/// Render the ranked rows as a box-drawn table
///
/// **Public** - used by the `top` command
///
/// # Arguments
/// * `entries` - Rows in display order
/// * `total` - Percentage base of the report
/// * `max_rows` - Rows to print before the "showing" footer
pub fn render_top_table(entries: &[TopEntry], total: i64, max_rows: usize) -> String {
    let mut lines = Vec::new();
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "  {}{}{}{}{}{}{}{}{}{}{}{}{}",
            left,
            "━".repeat(12),
            mid,
            "━".repeat(8),
            mid,
            "━".repeat(8),
            mid,
            "━".repeat(12),
            mid,
            "━".repeat(8),
            mid,
            "━".repeat(NAME_WIDTH + 2),
            right
        )
    };

    lines.push(rule("┏", "┳", "┓"));
    lines.push(format!(
        "  ┃ {:>10} ┃ {:>6} ┃ {:>6} ┃ {:>10} ┃ {:>6} ┃ {:<width$} ┃",
        "flat",
        "flat%",
        "sum%",
        "cum",
        "cum%",
        "name",
        width = NAME_WIDTH
    ));
    lines.push(rule("┣", "╋", "┫"));

    let mut running = 0i64;
    for entry in entries.iter().take(max_rows) {
        running = running.saturating_add(entry.flat);
        let name = if entry.inline_label.is_empty() {
            entry.name.clone()
        } else {
            format!("{} {}", entry.name, entry.inline_label)
        };

        lines.push(format!(
            "  ┃ {:>10} ┃ {:>6} ┃ {:>6} ┃ {:>10} ┃ {:>6} ┃ {:<width$} ┃",
            entry.flat_format,
            percentage(entry.flat, total),
            percentage(running, total),
            entry.cum_format,
            percentage(entry.cum, total),
            truncate_name(&name, NAME_WIDTH),
            width = NAME_WIDTH
        ));
    }

    lines.push(rule("┗", "┻", "┛"));

    if entries.len() > max_rows {
        lines.push(format!(
            "   (Showing top {} of {} nodes)",
            max_rows,
            entries.len()
        ));
    }

    lines.join("\n")
}

/// Keep the tail of long names, which holds the function itself
fn truncate_name(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count > max_len {
        let tail: String = s.chars().skip(count - (max_len - 3)).collect();
        format!("...{}", tail)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, flat: i64, cum: i64) -> TopEntry {
        TopEntry {
            name: name.to_string(),
            inline_label: String::new(),
            flat,
            cum,
            flat_format: flat.to_string(),
            cum_format: cum.to_string(),
        }
    }

    #[test]
    fn test_running_sum_column() {
        let rows = vec![entry("b", 6, 6), entry("c", 4, 4)];
        let table = render_top_table(&rows, 10, 20);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[3].contains("60%"));
        assert!(lines[4].contains("100%"));
        assert!(!table.contains("Showing"));
    }

    #[test]
    fn test_footer_when_truncated() {
        let rows = vec![entry("a", 1, 1), entry("b", 1, 1), entry("c", 1, 1)];
        let table = render_top_table(&rows, 3, 2);
        assert!(table.ends_with("(Showing top 2 of 3 nodes)"));
    }

    #[test]
    fn test_inline_label_follows_name() {
        let mut row = entry("memcpy", 1, 1);
        row.inline_label = "(inline)".to_string();
        let table = render_top_table(&[row], 1, 5);
        assert!(table.contains("memcpy (inline)"));
    }

    #[test]
    fn test_truncate_name_keeps_tail() {
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("github.com/x/y.Function", 10), "...unction");
    }
}
