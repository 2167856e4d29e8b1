// ============================================================================
// Numeric Errors
// Error types for digit-string and bit-field operations
// ============================================================================

use std::fmt;

/// Errors that can occur during digit-string and precision operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Character is not a digit of the requested radix
    InvalidDigit(char),
    /// Digit string is empty where at least one digit is required
    EmptyDigits,
    /// Decrement of an all-zero digit string
    DigitUnderflow,
    /// Requested bit precision is zero
    InvalidPrecision,
    /// Three-way comparison attempted on a NaN operand
    NanOperand,
    /// Value does not fit the target representation
    OutOfRange,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidDigit(c) => {
                write!(f, "invalid digit {:?} for the requested radix", c)
            },
            NumericError::EmptyDigits => write!(f, "empty digit string"),
            NumericError::DigitUnderflow => {
                write!(f, "digit underflow: cannot decrement an all-zero string")
            },
            NumericError::InvalidPrecision => {
                write!(f, "invalid precision: bit precision must be at least 1")
            },
            NumericError::NanOperand => {
                write!(f, "comparison is undefined for NaN operands")
            },
            NumericError::OutOfRange => write!(f, "value out of range for the target type"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::InvalidDigit('g').to_string(),
            "invalid digit 'g' for the requested radix"
        );
        assert_eq!(NumericError::EmptyDigits.to_string(), "empty digit string");
        assert_eq!(
            NumericError::InvalidPrecision.to_string(),
            "invalid precision: bit precision must be at least 1"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::EmptyDigits, NumericError::EmptyDigits);
        assert_ne!(
            NumericError::InvalidDigit('a'),
            NumericError::InvalidDigit('b')
        );
        assert_ne!(NumericError::NanOperand, NumericError::OutOfRange);
    }
}
