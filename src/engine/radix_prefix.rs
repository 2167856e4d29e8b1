// ============================================================================
// Radix-Prefix Partition
// Integers written with a leading 0b or 0x marker
// ============================================================================

use crate::engine::partition::PartitionCore;
use crate::numeric::digits::DigitBuf;
use crate::numeric::Radix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrefixState {
    Whitespace,
    SignSeen,
    /// The literal `0` consumed, marker letter expected next
    ZeroSeen,
    /// Marker consumed, at least one digit still required
    MarkerSeen(Radix),
    Digits(Radix),
}

/// Grammar for `ws* sign? '0' ('b' binDigits | 'x' hexDigits)`.
///
/// The two-character prefix must appear literally and be followed by at
/// least one digit of the announced base; any other character rejects at
/// its own position.
#[derive(Debug, Clone)]
pub struct RadixPrefixPartition {
    pub(crate) core: PartitionCore,
    state: PrefixState,
    sign: Option<char>,
    digits: DigitBuf,
}

impl RadixPrefixPartition {
    pub fn new() -> Self {
        Self {
            core: PartitionCore::new(),
            state: PrefixState::Whitespace,
            sign: None,
            digits: DigitBuf::new(),
        }
    }

    pub fn advance(&mut self, index: usize, ch: char) {
        if self.core.is_failed() {
            return;
        }
        match self.state {
            PrefixState::Whitespace => {
                if ch.is_whitespace() {
                    self.core.whitespace_end = index + ch.len_utf8();
                } else if ch == '+' || ch == '-' {
                    self.sign = Some(ch);
                    self.state = PrefixState::SignSeen;
                } else if ch == '0' {
                    self.state = PrefixState::ZeroSeen;
                } else {
                    self.core.fail(index);
                }
            }
            PrefixState::SignSeen => {
                if ch == '0' {
                    self.state = PrefixState::ZeroSeen;
                } else {
                    self.core.fail(index);
                }
            }
            PrefixState::ZeroSeen => match Radix::from_prefix_letter(ch) {
                Some(radix) => self.state = PrefixState::MarkerSeen(radix),
                None => self.core.fail(index),
            },
            PrefixState::MarkerSeen(radix) | PrefixState::Digits(radix) => {
                match radix.digit_value(ch) {
                    Some(value) => {
                        self.digits.push(value);
                        self.state = PrefixState::Digits(radix);
                    }
                    None => self.core.fail(index),
                }
            }
        }
    }

    pub fn finalize(&mut self, text_len: usize) {
        self.core.text_len = text_len;
        if !self.core.is_failed() && matches!(self.state, PrefixState::Digits(_)) {
            self.core.fully_valid = true;
        }
    }

    pub fn radix(&self) -> Option<Radix> {
        match self.state {
            PrefixState::MarkerSeen(radix) | PrefixState::Digits(radix) => Some(radix),
            _ => None,
        }
    }

    pub(crate) fn digit_values(&self) -> &[u8] {
        &self.digits
    }

    pub(crate) fn is_negative(&self) -> bool {
        self.sign == Some('-')
    }
}

impl Default for RadixPrefixPartition {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> RadixPrefixPartition {
        let mut partition = RadixPrefixPartition::new();
        for (index, ch) in text.char_indices() {
            partition.advance(index, ch);
        }
        partition.finalize(text.len());
        partition
    }

    #[test]
    fn test_hex_prefix() {
        let p = run("0x1F");
        assert!(p.core.fully_valid);
        assert_eq!(p.radix(), Some(Radix::Hexadecimal));
        assert_eq!(p.digit_values(), &[1, 15]);
    }

    #[test]
    fn test_binary_prefix() {
        let p = run("0b101");
        assert!(p.core.fully_valid);
        assert_eq!(p.radix(), Some(Radix::Binary));
        assert_eq!(p.digit_values(), &[1, 0, 1]);
    }

    #[test]
    fn test_signed_prefix() {
        let p = run("-0x1F");
        assert!(p.core.fully_valid);
        assert!(p.is_negative());
    }

    #[test]
    fn test_prefix_without_digits() {
        let p = run("0x");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 2);
    }

    #[test]
    fn test_invalid_digit_rejects_at_position() {
        let p = run("0xZ");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 2);

        // Binary digits stop at the first non-binary character.
        let p = run("0b102");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 4);
    }

    #[test]
    fn test_trailing_content() {
        let p = run("0x1Fx");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 4);
        assert_eq!(p.digit_values(), &[1, 15]);
    }

    #[test]
    fn test_marker_must_be_lowercase() {
        let p = run("0B1");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 1);
    }

    #[test]
    fn test_double_zero_rejects() {
        let p = run("00b1");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 1);
    }

    #[test]
    fn test_leading_whitespace() {
        let p = run(" 0b1");
        assert!(p.core.fully_valid);
        assert_eq!(p.core.whitespace_end, 1);
    }
}
