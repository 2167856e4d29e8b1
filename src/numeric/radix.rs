// ============================================================================
// Radix
// Digit alphabets for the four supported numeric bases
// ============================================================================

use crate::numeric::errors::{NumericError, NumericResult};

/// Numeric base of a literal's digits.
///
/// All digit validity and digit/value mapping funnels through this type, so
/// the digit-string primitives stay radix-agnostic. Hexadecimal digits are
/// accepted in either case on input and produced uppercase on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Radix {
    /// Base 2, prefix `0b`, suffix `:B`
    Binary,
    /// Base 8, suffix `:O` (no prefix form)
    Octal,
    /// Base 10, the default literal base
    Decimal,
    /// Base 16, prefix `0x`, suffix `:H`
    Hexadecimal,
}

impl Radix {
    /// Numeric value of the base.
    #[inline]
    pub const fn base(self) -> u8 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    /// Whether `c` is a digit of this base (hex accepts both cases).
    #[inline]
    pub fn is_digit(self, c: char) -> bool {
        self.digit_value(c).is_some()
    }

    /// Numeric value of the digit character `c`, if it belongs to this base.
    #[inline]
    pub fn digit_value(self, c: char) -> Option<u8> {
        let value = match c {
            '0'..='9' => c as u8 - b'0',
            'a'..='f' => c as u8 - b'a' + 10,
            'A'..='F' => c as u8 - b'A' + 10,
            _ => return None,
        };
        if value < self.base() {
            Some(value)
        } else {
            None
        }
    }

    /// Canonical digit character for `value` (uppercase for 10..=15).
    #[inline]
    pub fn digit_char(self, value: u8) -> NumericResult<char> {
        if value >= self.base() {
            return Err(NumericError::OutOfRange);
        }
        Ok(if value < 10 {
            (b'0' + value) as char
        } else {
            (b'A' + value - 10) as char
        })
    }

    /// Letter following `0` in the prefix form, if this base has one.
    #[inline]
    pub const fn prefix_letter(self) -> Option<char> {
        match self {
            Radix::Binary => Some('b'),
            Radix::Hexadecimal => Some('x'),
            _ => None,
        }
    }

    /// Base announced by a prefix letter (`b` or `x`, lowercase only).
    #[inline]
    pub const fn from_prefix_letter(c: char) -> Option<Radix> {
        match c {
            'b' => Some(Radix::Binary),
            'x' => Some(Radix::Hexadecimal),
            _ => None,
        }
    }

    /// Letter following `:` in the suffix form, if this base has one.
    #[inline]
    pub const fn suffix_letter(self) -> Option<char> {
        match self {
            Radix::Binary => Some('B'),
            Radix::Octal => Some('O'),
            Radix::Hexadecimal => Some('H'),
            _ => None,
        }
    }

    /// Base announced by a suffix letter (`B`, `O` or `H`).
    #[inline]
    pub const fn from_suffix_letter(c: char) -> Option<Radix> {
        match c {
            'B' => Some(Radix::Binary),
            'O' => Some(Radix::Octal),
            'H' => Some(Radix::Hexadecimal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Radix; 4] = [
        Radix::Binary,
        Radix::Octal,
        Radix::Decimal,
        Radix::Hexadecimal,
    ];

    #[test]
    fn test_digit_table_round_trip() {
        for radix in ALL {
            for value in 0..radix.base() {
                let c = radix.digit_char(value).unwrap();
                assert_eq!(radix.digit_value(c), Some(value), "{:?} {}", radix, value);
            }
        }
    }

    #[test]
    fn test_hex_digits_case_insensitive() {
        assert_eq!(Radix::Hexadecimal.digit_value('a'), Some(10));
        assert_eq!(Radix::Hexadecimal.digit_value('A'), Some(10));
        assert_eq!(Radix::Hexadecimal.digit_value('f'), Some(15));
        assert_eq!(Radix::Hexadecimal.digit_value('F'), Some(15));
        // Canonical output is uppercase.
        assert_eq!(Radix::Hexadecimal.digit_char(11).unwrap(), 'B');
    }

    #[test]
    fn test_alien_characters_rejected() {
        assert_eq!(Radix::Binary.digit_value('2'), None);
        assert_eq!(Radix::Octal.digit_value('8'), None);
        assert_eq!(Radix::Decimal.digit_value('a'), None);
        assert_eq!(Radix::Hexadecimal.digit_value('g'), None);
        assert_eq!(Radix::Hexadecimal.digit_value(':'), None);
        assert!(!Radix::Decimal.is_digit(' '));
    }

    #[test]
    fn test_digit_char_out_of_range() {
        assert_eq!(Radix::Binary.digit_char(2), Err(NumericError::OutOfRange));
        assert_eq!(Radix::Decimal.digit_char(10), Err(NumericError::OutOfRange));
    }

    #[test]
    fn test_prefix_letters() {
        assert_eq!(Radix::from_prefix_letter('b'), Some(Radix::Binary));
        assert_eq!(Radix::from_prefix_letter('x'), Some(Radix::Hexadecimal));
        // Uppercase prefixes are not part of the grammar.
        assert_eq!(Radix::from_prefix_letter('B'), None);
        assert_eq!(Radix::from_prefix_letter('X'), None);
        assert_eq!(Radix::Octal.prefix_letter(), None);
    }

    #[test]
    fn test_suffix_letters() {
        assert_eq!(Radix::from_suffix_letter('B'), Some(Radix::Binary));
        assert_eq!(Radix::from_suffix_letter('O'), Some(Radix::Octal));
        assert_eq!(Radix::from_suffix_letter('H'), Some(Radix::Hexadecimal));
        assert_eq!(Radix::from_suffix_letter('b'), None);
        assert_eq!(Radix::Decimal.suffix_letter(), None);
        assert_eq!(Radix::Binary.suffix_letter(), Some('B'));
    }
}
