//! Pure conversion between canonical seconds and the (value, unit) pair
//! shown in the interval field. Display is necessarily lossy for ratios
//! that do not divide evenly; conversions round to the nearest whole
//! second on the way in and to 4 decimal places on the way out.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
}

impl Unit {
    pub fn factor(self) -> u64 {
        match self {
            Unit::Seconds => 1,
            Unit::Minutes => 60,
            Unit::Hours => 3600,
        }
    }
}

/// Largest unit that renders `seconds` as a whole number, hours first.
pub fn largest_exact_unit(seconds: u64) -> Unit {
    if seconds % 3600 == 0 {
        Unit::Hours
    } else if seconds % 60 == 0 {
        Unit::Minutes
    } else {
        Unit::Seconds
    }
}

/// Displayed value back to whole seconds. Values below one second are
/// not rejected here; that is the caller's decision.
pub fn to_seconds(value: f64, unit: Unit) -> i64 {
    (value * unit.factor() as f64).round() as i64
}

/// Canonical seconds to a displayed value in `unit`, rounded to 4
/// decimal places so floating artifacts never reach the screen.
pub fn from_seconds(seconds: u64, unit: Unit) -> f64 {
    round4(seconds as f64 / unit.factor() as f64)
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Renders a displayed value: whole numbers without a fractional part,
/// fractional values with trailing zeros trimmed.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let rendered = format!("{value:.4}");
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
