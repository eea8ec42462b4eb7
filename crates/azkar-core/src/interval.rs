//! Reconciles the canonical interval (whole seconds, owned by the store)
//! with the transient (raw text, unit) pair the user edits. The display
//! is only re-derived when it has drifted past tolerance, so a value the
//! user is mid-typing is never clobbered while it still matches.

use tracing::debug;

use crate::units::{self, Unit};

/// Maximum divergence, in seconds, between the displayed value and the
/// canonical one before the display snaps back to canonical.
pub const DRIFT_TOLERANCE_SECONDS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalDisplay {
    pub unit: Unit,
    pub raw_input: String,
}

impl IntervalDisplay {
    /// Derives a fresh display from canonical seconds using the
    /// largest-exact-unit rule.
    pub fn derive(canonical_seconds: u64) -> Self {
        let unit = units::largest_exact_unit(canonical_seconds);
        let raw_input = units::format_value(units::from_seconds(canonical_seconds, unit));
        Self { unit, raw_input }
    }

    /// Seconds currently denoted by the raw text, or None when the text
    /// does not parse as a finite number.
    pub fn display_seconds(&self) -> Option<f64> {
        let value: f64 = self.raw_input.trim().parse().ok()?;
        value
            .is_finite()
            .then(|| value * self.unit.factor() as f64)
    }

    /// Called whenever a new canonical snapshot arrives. Unparseable raw
    /// text never matches, so it always snaps. Returns whether the
    /// display was re-derived.
    pub fn reconcile(&mut self, canonical_seconds: u64) -> bool {
        let drifted = match self.display_seconds() {
            Some(display) => {
                (display - canonical_seconds as f64).abs() > DRIFT_TOLERANCE_SECONDS
            }
            None => true,
        };
        if drifted {
            debug!(
                canonical_seconds,
                raw_input = %self.raw_input,
                "interval display drifted; re-deriving"
            );
            *self = Self::derive(canonical_seconds);
        }
        drifted
    }

    /// A keystroke in the interval field. The text is stored verbatim;
    /// typing is never blocked. Returns the whole seconds to submit when
    /// the text denotes at least one second, otherwise None (the input
    /// stays local and nothing is sent).
    pub fn edit(&mut self, raw: impl Into<String>) -> Option<u64> {
        self.raw_input = raw.into();
        let value: f64 = self.raw_input.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        let seconds = units::to_seconds(value, self.unit);
        (seconds >= 1).then_some(seconds as u64)
    }

    /// Unit selector change with no numeric edit. Display-only: no
    /// command is issued. When the typed value is within tolerance of
    /// canonical, conversion starts from canonical exactly so repeated
    /// switches cannot compound rounding error.
    pub fn change_unit(&mut self, new_unit: Unit, canonical_seconds: u64) {
        let seconds = match self.display_seconds() {
            Some(display)
                if (display - canonical_seconds as f64).abs() <= DRIFT_TOLERANCE_SECONDS =>
            {
                canonical_seconds as f64
            }
            Some(display) => display,
            None => canonical_seconds as f64,
        };
        self.unit = new_unit;
        self.raw_input = units::format_value(units::round4(seconds / new_unit.factor() as f64));
    }
}

#[cfg(test)]
mod tests {
    use super::IntervalDisplay;
    use crate::units::Unit;

    #[test]
    fn derive_uses_largest_exact_unit() {
        let display = IntervalDisplay::derive(7200);
        assert_eq!(display.unit, Unit::Hours);
        assert_eq!(display.raw_input, "2");

        let display = IntervalDisplay::derive(90);
        assert_eq!(display.unit, Unit::Minutes);
        assert_eq!(display.raw_input, "1.5");

        let display = IntervalDisplay::derive(7);
        assert_eq!(display.unit, Unit::Seconds);
        assert_eq!(display.raw_input, "7");
    }

    #[test]
    fn derived_display_round_trips_exactly() {
        for seconds in [1, 7, 60, 61, 90, 3600, 5400, 7200, 86400] {
            let mut display = IntervalDisplay::derive(seconds);
            let raw = display.raw_input.clone();
            assert_eq!(display.edit(raw), Some(seconds));
        }
    }

    #[test]
    fn unit_switches_leave_no_residual_drift() {
        let mut display = IntervalDisplay::derive(3600);
        assert_eq!(display.unit, Unit::Hours);
        assert_eq!(display.raw_input, "1");

        display.change_unit(Unit::Minutes, 3600);
        assert_eq!(display.raw_input, "60");

        display.change_unit(Unit::Seconds, 3600);
        assert_eq!(display.raw_input, "3600");
    }

    #[test]
    fn external_drift_forces_rederivation() {
        let mut display = IntervalDisplay {
            unit: Unit::Minutes,
            raw_input: "1".to_string(),
        };
        assert!(display.reconcile(61));
        assert_eq!(display.unit, Unit::Seconds);
        assert_eq!(display.raw_input, "61");
    }

    #[test]
    fn matching_input_is_not_clobbered() {
        let mut display = IntervalDisplay {
            unit: Unit::Minutes,
            raw_input: String::new(),
        };
        assert_eq!(display.edit("2"), Some(120));
        assert!(!display.reconcile(120));
        assert_eq!(display.unit, Unit::Minutes);
        assert_eq!(display.raw_input, "2");
    }

    #[test]
    fn unparseable_input_always_snaps_on_reconcile() {
        let mut display = IntervalDisplay {
            unit: Unit::Minutes,
            raw_input: "1.5.2".to_string(),
        };
        assert!(display.reconcile(90));
        assert_eq!(display.unit, Unit::Minutes);
        assert_eq!(display.raw_input, "1.5");
    }

    #[test]
    fn sub_second_and_unparseable_edits_submit_nothing() {
        let mut display = IntervalDisplay::derive(60);
        assert_eq!(display.unit, Unit::Minutes);

        assert_eq!(display.edit("0"), None);
        assert_eq!(display.raw_input, "0");

        assert_eq!(display.edit("abc"), None);
        assert_eq!(display.raw_input, "abc");

        assert_eq!(display.edit(""), None);
        assert_eq!(display.raw_input, "");

        // 0.004 minutes rounds to 0 whole seconds.
        assert_eq!(display.edit("0.004"), None);
    }

    #[test]
    fn unit_change_converts_typed_value_when_it_diverges() {
        let mut display = IntervalDisplay {
            unit: Unit::Hours,
            raw_input: "2".to_string(),
        };
        // Typed 7200s against canonical 3600s: convert the typed value.
        display.change_unit(Unit::Minutes, 3600);
        assert_eq!(display.raw_input, "120");
    }

    #[test]
    fn unit_change_snaps_to_canonical_within_tolerance() {
        let mut display = IntervalDisplay {
            unit: Unit::Minutes,
            raw_input: "1.5".to_string(),
        };
        display.change_unit(Unit::Seconds, 90);
        assert_eq!(display.raw_input, "90");
        display.change_unit(Unit::Hours, 90);
        assert_eq!(display.raw_input, "0.025");
        display.change_unit(Unit::Minutes, 90);
        assert_eq!(display.raw_input, "1.5");
    }
}
