// ============================================================================
// Number Locale
// Culture-specific text conventions for parsing and rendering
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Locale conventions consulted when reading and writing decimal literals.
///
/// Only the decimal separator participates in parsing; the remaining fields
/// shape rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberLocale {
    /// Character between the integer and fraction parts
    pub decimal_separator: char,

    /// Rendered text for a quiet NaN
    pub nan: String,

    /// Rendered text for positive infinity
    pub positive_infinity: String,

    /// Rendered text for negative infinity
    pub negative_infinity: String,

    /// Fraction digit count used by fixed-point formats that give none
    pub fixed_digits: u8,
}

impl NumberLocale {
    /// Builder method: set the decimal separator
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Builder method: set the default fixed-point fraction digit count
    pub fn with_fixed_digits(mut self, digits: u8) -> Self {
        self.fixed_digits = digits;
        self
    }

    /// Builder method: set the NaN rendering text
    pub fn with_nan_text(mut self, text: impl Into<String>) -> Self {
        self.nan = text.into();
        self
    }

    /// Builder method: set both infinity rendering texts
    pub fn with_infinity_texts(
        mut self,
        positive: impl Into<String>,
        negative: impl Into<String>,
    ) -> Self {
        self.positive_infinity = positive.into();
        self.negative_infinity = negative.into();
        self
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::invariant()
    }
}

// ============================================================================
// Preset Locales (Factory Methods)
// ============================================================================

impl NumberLocale {
    /// Invariant locale: period separator, English special-value names
    pub fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            nan: "NaN".to_string(),
            positive_infinity: "Infinity".to_string(),
            negative_infinity: "-Infinity".to_string(),
            fixed_digits: 2,
        }
    }

    /// Continental European locale: comma separator, otherwise invariant
    pub fn decimal_comma() -> Self {
        Self::invariant().with_decimal_separator(',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_defaults() {
        let locale = NumberLocale::default();
        assert_eq!(locale.decimal_separator, '.');
        assert_eq!(locale.nan, "NaN");
        assert_eq!(locale.positive_infinity, "Infinity");
        assert_eq!(locale.negative_infinity, "-Infinity");
        assert_eq!(locale.fixed_digits, 2);
    }

    #[test]
    fn test_decimal_comma_preset() {
        let locale = NumberLocale::decimal_comma();
        assert_eq!(locale.decimal_separator, ',');
        assert_eq!(locale.nan, "NaN");
    }

    #[test]
    fn test_builder_pattern() {
        let locale = NumberLocale::invariant()
            .with_fixed_digits(4)
            .with_nan_text("not-a-number")
            .with_infinity_texts("inf", "-inf");

        assert_eq!(locale.fixed_digits, 4);
        assert_eq!(locale.nan, "not-a-number");
        assert_eq!(locale.positive_infinity, "inf");
        assert_eq!(locale.negative_infinity, "-inf");
    }
}
