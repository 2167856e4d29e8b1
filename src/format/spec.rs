// ============================================================================
// Format Specification
// Parsed form of the G/E/F format strings
// ============================================================================

use std::fmt;

/// Rendering family selected by the leading format character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// Shortest faithful form; the default
    General,
    /// Normalized significand with an explicit exponent
    Scientific,
    /// Plain decimal with a fixed number of fraction digits
    Fixed,
}

/// A parsed format string such as `"G"`, `"e4"` or `"F2"`.
///
/// The precision digit counts significant digits under `G` and fraction
/// digits under `E`/`F`; absent (or `0` under `G`) it falls back to the
/// kind's default. An uppercase format letter selects an uppercase
/// exponent marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub kind: FormatKind,
    pub uppercase_exponent: bool,
    pub precision: Option<u8>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        FormatSpec {
            kind: FormatKind::General,
            uppercase_exponent: false,
            precision: None,
        }
    }
}

impl FormatSpec {
    /// Parse a format string. Empty input selects the default general form.
    ///
    /// # Errors
    ///
    /// [`FormatError::UnknownKind`] for a leading character outside
    /// `G`/`E`/`F` (either case); [`FormatError::InvalidPrecision`] when the
    /// remainder is not one or two ASCII digits.
    pub fn parse(text: &str) -> FormatResult<FormatSpec> {
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return Ok(FormatSpec::default());
        };
        let kind = match first {
            'G' | 'g' => FormatKind::General,
            'E' | 'e' => FormatKind::Scientific,
            'F' | 'f' => FormatKind::Fixed,
            other => return Err(FormatError::UnknownKind(other)),
        };
        let digits = chars.as_str();
        let precision = if digits.is_empty() {
            None
        } else {
            if digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FormatError::InvalidPrecision);
            }
            Some(digits.parse().map_err(|_| FormatError::InvalidPrecision)?)
        };
        Ok(FormatSpec {
            kind,
            uppercase_exponent: first.is_ascii_uppercase(),
            precision,
        })
    }
}

/// Rejected format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Leading character names no known format kind
    UnknownKind(char),
    /// Precision is not one or two ASCII digits
    InvalidPrecision,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownKind(c) => write!(f, "unknown format kind {:?}", c),
            FormatError::InvalidPrecision => {
                write!(f, "format precision must be one or two decimal digits")
            }
        }
    }
}

impl std::error::Error for FormatError {}

pub type FormatResult<T> = Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default_general() {
        let spec = FormatSpec::parse("").unwrap();
        assert_eq!(spec, FormatSpec::default());
        assert_eq!(spec.kind, FormatKind::General);
        assert!(!spec.uppercase_exponent);
        assert_eq!(spec.precision, None);
    }

    #[test]
    fn test_kind_letters() {
        assert_eq!(FormatSpec::parse("G").unwrap().kind, FormatKind::General);
        assert_eq!(FormatSpec::parse("g").unwrap().kind, FormatKind::General);
        assert_eq!(
            FormatSpec::parse("E").unwrap().kind,
            FormatKind::Scientific
        );
        assert_eq!(FormatSpec::parse("f").unwrap().kind, FormatKind::Fixed);
    }

    #[test]
    fn test_case_selects_exponent_marker() {
        assert!(FormatSpec::parse("E4").unwrap().uppercase_exponent);
        assert!(!FormatSpec::parse("e4").unwrap().uppercase_exponent);
        assert!(FormatSpec::parse("G").unwrap().uppercase_exponent);
    }

    #[test]
    fn test_precision_digits() {
        assert_eq!(FormatSpec::parse("G5").unwrap().precision, Some(5));
        assert_eq!(FormatSpec::parse("e0").unwrap().precision, Some(0));
        assert_eq!(FormatSpec::parse("F17").unwrap().precision, Some(17));
        assert_eq!(FormatSpec::parse("g99").unwrap().precision, Some(99));
        assert_eq!(FormatSpec::parse("F00").unwrap().precision, Some(0));
    }

    #[test]
    fn test_rejected_formats() {
        assert_eq!(
            FormatSpec::parse("X"),
            Err(FormatError::UnknownKind('X'))
        );
        assert_eq!(
            FormatSpec::parse("%4"),
            Err(FormatError::UnknownKind('%'))
        );
        assert_eq!(
            FormatSpec::parse("G100"),
            Err(FormatError::InvalidPrecision)
        );
        assert_eq!(
            FormatSpec::parse("G1x"),
            Err(FormatError::InvalidPrecision)
        );
        assert_eq!(
            FormatSpec::parse("E-1"),
            Err(FormatError::InvalidPrecision)
        );
    }
}
