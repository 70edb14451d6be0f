//! Value and percentage formatting.
//!
//! Profiles carry raw integers in a sample unit (nanoseconds, bytes,
//! plain counts). These helpers scale them to a readable unit and render
//! percentages of a report total.

mod units;

pub use units::{scale, scaled_label};

/// Formats raw values of one sample unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormatter {
    unit: String,
    output_unit: String,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new("count")
    }
}

impl ValueFormatter {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            output_unit: "auto".to_string(),
        }
    }

    /// Force a specific output unit instead of picking one per value
    pub fn with_output_unit(mut self, unit: impl Into<String>) -> Self {
        self.output_unit = unit.into();
        self
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn format_value(&self, value: i64) -> String {
        scaled_label(value, &self.unit, &self.output_unit)
    }

    pub fn percentage(&self, value: i64, total: i64) -> String {
        percentage(value, total)
    }
}

/// Render `value` as a percentage of `total`.
///
/// A zero total yields `"0%"`. The result is never padded.
pub fn percentage(value: i64, total: i64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let ratio = (value as f64 / total as f64).abs() * 100.0;

    if (99.95..=100.05).contains(&ratio) {
        return "100%".to_string();
    }
    if ratio == 0.0 {
        return "0%".to_string();
    }
    let digits = if ratio >= 1.0 {
        2
    } else {
        // two significant digits
        (1 - ratio.log10().floor() as i32).max(0) as usize
    };
    format!("{}%", trim_decimal(&format!("{:.*}", digits, ratio)))
}

/// Drop trailing zeros after a decimal point, and the point itself if bare
pub(crate) fn trim_decimal(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_whole_numbers() {
        assert_eq!(percentage(10, 10), "100%");
        assert_eq!(percentage(6, 10), "60%");
        assert_eq!(percentage(4, 10), "40%");
        assert_eq!(percentage(0, 10), "0%");
    }

    #[test]
    fn test_percentage_fractions() {
        assert_eq!(percentage(125, 1000), "12.5%");
        assert_eq!(percentage(1, 3), "33.33%");
        assert_eq!(percentage(123, 1_000_000), "0.012%");
        assert_eq!(percentage(5, 1000), "0.5%");
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), "0%");
        assert_eq!(percentage(42, 0), "0%");
    }

    #[test]
    fn test_percentage_negative_and_over_hundred() {
        assert_eq!(percentage(-5, 10), "50%");
        assert_eq!(percentage(15, 10), "150%");
        assert_eq!(percentage(9999, 10000), "100%");
    }

    #[test]
    fn test_percentage_has_no_padding() {
        for (v, t) in [(0, 0), (1, 7), (3, 1000), (1000, 1000), (7, 3)] {
            let p = percentage(v, t);
            assert_eq!(p, p.trim());
        }
    }

    #[test]
    fn test_formatter_uses_unit() {
        let f = ValueFormatter::new("nanoseconds");
        assert_eq!(f.format_value(10_000_000), "10ms");
        assert_eq!(f.percentage(1, 4), "25%");

        let fixed = ValueFormatter::new("nanoseconds").with_output_unit("s");
        assert_eq!(fixed.format_value(1_500_000_000), "1.50s");
    }
}
