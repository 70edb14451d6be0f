//! Unit tables and scaling.

struct Unit {
    aliases: &'static [&'static str],
    label: &'static str,
    factor: f64,
}

struct UnitFamily {
    units: &'static [Unit],
}

const TIME: UnitFamily = UnitFamily {
    units: &[
        Unit { aliases: &["nanosecond", "nanoseconds", "ns"], label: "ns", factor: 1.0 },
        Unit { aliases: &["microsecond", "microseconds", "us", "µs"], label: "us", factor: 1e3 },
        Unit { aliases: &["millisecond", "milliseconds", "ms"], label: "ms", factor: 1e6 },
        Unit { aliases: &["second", "seconds", "sec", "s"], label: "s", factor: 1e9 },
        Unit { aliases: &["minute", "minutes", "min", "mins"], label: "mins", factor: 60e9 },
        Unit { aliases: &["hour", "hours", "hr", "hrs"], label: "hrs", factor: 3600e9 },
    ],
};

const MEMORY: UnitFamily = UnitFamily {
    units: &[
        Unit { aliases: &["byte", "bytes", "b"], label: "B", factor: 1.0 },
        Unit { aliases: &["kilobyte", "kilobytes", "kb", "kib"], label: "kB", factor: 1024.0 },
        Unit { aliases: &["megabyte", "megabytes", "mb", "mib"], label: "MB", factor: 1_048_576.0 },
        Unit { aliases: &["gigabyte", "gigabytes", "gb", "gib"], label: "GB", factor: 1_073_741_824.0 },
        Unit { aliases: &["terabyte", "terabytes", "tb", "tib"], label: "TB", factor: 1_099_511_627_776.0 },
    ],
};

const COUNT_UNITS: &[&str] = &["", "count", "counts", "sample", "samples"];

impl UnitFamily {
    fn find(&self, unit: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.aliases.iter().any(|a| *a == unit))
    }

    fn scale(&self, value: i64, from: &Unit, to: &str) -> Option<(f64, String)> {
        let base = value as f64 * from.factor;
        let target = if to == "auto" || to == "minimum" {
            self.units
                .iter()
                .rev()
                .find(|u| base.abs() >= u.factor)
                .unwrap_or(&self.units[0])
        } else {
            self.find(to)?
        };
        Some((base / target.factor, target.label.to_string()))
    }
}

/// Scale `value` from `from_unit` into `to_unit`.
///
/// `to_unit` of `"auto"` picks the largest unit that keeps the value
/// at or above one. Unknown units are passed through unscaled.
pub fn scale(value: i64, from_unit: &str, to_unit: &str) -> (f64, String) {
    let from = from_unit.to_lowercase();
    let to = to_unit.to_lowercase();

    if COUNT_UNITS.iter().any(|c| *c == from) {
        return (value as f64, String::new());
    }
    for family in [&TIME, &MEMORY] {
        if let Some(unit) = family.find(&from) {
            if let Some(scaled) = family.scale(value, unit, &to) {
                return scaled;
            }
            // target unit from another family: leave as is
            return (value as f64, unit.label.to_string());
        }
    }
    (value as f64, from_unit.to_string())
}

/// Human label for `value`, e.g. `"10ms"` or `"1.50MB"`
pub fn scaled_label(value: i64, from_unit: &str, to_unit: &str) -> String {
    let (v, unit) = scale(value, from_unit, to_unit);
    let s = format!("{:.2}", v);
    let s = s.strip_suffix(".00").unwrap_or(&s);
    if s == "0" || s == "-0" {
        return "0".to_string();
    }
    format!("{}{}", s, unit)
}
