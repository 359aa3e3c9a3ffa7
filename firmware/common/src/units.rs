//! Display unit conversion.
//!
//! Values are stored in SI units (km, kph, °C) and converted for display
//! when the user picked imperial units. The conversion is chosen by the
//! field's units string: `"kph"` and `"km"` (any case) are distances and
//! speeds, `"C"` (exact) is a temperature.
//!
//! All arithmetic is integer with round-half-up, which keeps a
//! store → display → store round trip within one unit.

/// Global unit preferences, consulted by every editable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Units {
    /// Show kph/km as mph/mi.
    pub imperial: bool,
    /// Show °C as °F.
    pub fahrenheit: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conversion {
    None,
    Distance,
    Temperature,
}

impl Units {
    pub const METRIC: Self = Self {
        imperial: false,
        fahrenheit: false,
    };

    pub const IMPERIAL: Self = Self {
        imperial: true,
        fahrenheit: true,
    };

    fn conversion(
        self,
        units: &str,
    ) -> Conversion {
        if self.imperial && (units.eq_ignore_ascii_case("kph") || units.eq_ignore_ascii_case("km")) {
            Conversion::Distance
        } else if self.fahrenheit && units == "C" {
            Conversion::Temperature
        } else {
            Conversion::None
        }
    }

    /// Convert a stored value to the unit the user sees.
    pub fn to_display(
        self,
        value: u32,
        units: &str,
    ) -> u32 {
        let v = u64::from(value);
        let converted = match self.conversion(units) {
            Conversion::None => v,
            // km -> mi, divide by 1.61
            Conversion::Distance => (v * 100 + 80) / 161,
            Conversion::Temperature => 32 + (v * 9 + 2) / 5,
        };
        saturate(converted)
    }

    /// Convert a displayed value back to the stored unit.
    pub fn from_display(
        self,
        value: u32,
        units: &str,
    ) -> u32 {
        let v = u64::from(value);
        let converted = match self.conversion(units) {
            Conversion::None => v,
            // mi -> km, multiply by 1.61
            Conversion::Distance => (v * 161 + 50) / 100,
            // Fahrenheit below freezing maps to 0 °C, stored values are unsigned
            Conversion::Temperature => (v.saturating_sub(32) * 5 + 4) / 9,
        };
        saturate(converted)
    }

    /// Units string to show next to a value.
    pub fn label<'s>(
        self,
        units: &'s str,
    ) -> &'s str {
        match self.conversion(units) {
            Conversion::Distance if units.eq_ignore_ascii_case("kph") => "mph",
            Conversion::Distance => "mi",
            Conversion::Temperature => "F",
            Conversion::None => units,
        }
    }
}

#[inline]
fn saturate(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_is_identity() {
        assert_eq!(Units::METRIC.to_display(250, "kph"), 250);
        assert_eq!(Units::METRIC.from_display(250, "C"), 250);
        assert_eq!(Units::METRIC.label("km"), "km");
    }

    #[test]
    fn test_distance_conversion() {
        let units = Units::IMPERIAL;
        assert_eq!(units.to_display(161, "km"), 100);
        assert_eq!(units.from_display(100, "KM"), 161);
        assert_eq!(units.to_display(250, "kph"), 155);
    }

    #[test]
    fn test_temperature_conversion() {
        let units = Units::IMPERIAL;
        assert_eq!(units.to_display(100, "C"), 212);
        assert_eq!(units.to_display(0, "C"), 32);
        assert_eq!(units.from_display(212, "C"), 100);
        assert_eq!(units.from_display(10, "C"), 0);
    }

    #[test]
    fn test_temperature_match_is_case_sensitive() {
        assert_eq!(Units::IMPERIAL.to_display(100, "c"), 100);
        assert_eq!(Units::IMPERIAL.label("c"), "c");
    }

    #[test]
    fn test_labels() {
        let units = Units::IMPERIAL;
        assert_eq!(units.label("kph"), "mph");
        assert_eq!(units.label("Kph"), "mph");
        assert_eq!(units.label("km"), "mi");
        assert_eq!(units.label("C"), "F");
        assert_eq!(units.label("W"), "W");
    }

    #[test]
    fn test_flags_are_independent() {
        let units = Units {
            imperial: true,
            fahrenheit: false,
        };
        assert_eq!(units.to_display(100, "C"), 100);
        assert_eq!(units.label("km"), "mi");
    }

    #[test]
    fn test_large_values_saturate() {
        assert_eq!(Units::IMPERIAL.from_display(u32::MAX, "km"), u32::MAX);
    }
}

#[cfg(test)]
mod units_proptests {
    use super::Units;
    use proptest::prelude::*;

    fn arb_units() -> impl Strategy<Value = Units> {
        (any::<bool>(), any::<bool>()).prop_map(|(imperial, fahrenheit)| Units {
            imperial,
            fahrenheit,
        })
    }

    proptest! {
        #[test]
        fn round_trip_within_one_unit(
            units in arb_units(),
            unit in prop::sample::select(vec!["kph", "km", "C", "W", ""]),
            value in 0u32..=100_000_000,
        ) {
            let back = units.from_display(units.to_display(value, unit), unit);
            prop_assert!(back.abs_diff(value) <= 1, "{} -> {}", value, back);
        }
    }
}
