//! Errors raised while building fields and screens.
//!
//! Only construction can fail recoverably: every table in the UI core is a
//! fixed-capacity `heapless` collection. Broken invariants at runtime (a
//! missing font, an over-deep menu stack) are programmer errors and panic.

use core::fmt;

/// Capacity errors from the construction-time API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum UiError {
    /// The field arena is full.
    TooManyFields,
    /// A screen has no room for another layout.
    TooManyLayouts,
    /// The screen table is full.
    TooManyScreens,
    /// A scrollable menu has more entries than it can hold.
    TooManyEntries,
    /// A customizable slot has more choices than it can hold.
    TooManyChoices,
}

impl fmt::Display for UiError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let msg = match self {
            Self::TooManyFields => "field arena is full",
            Self::TooManyLayouts => "screen layout table is full",
            Self::TooManyScreens => "screen table is full",
            Self::TooManyEntries => "scrollable has too many entries",
            Self::TooManyChoices => "customizable has too many choices",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for UiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(UiError::TooManyFields.to_string(), "field arena is full");
        assert_eq!(UiError::TooManyChoices.to_string(), "customizable has too many choices");
    }
}
