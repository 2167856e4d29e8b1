// ============================================================================
// Radix-Suffix Partition
// Integers written with a trailing :B, :O or :H marker
// ============================================================================

use smallvec::SmallVec;

use crate::engine::partition::PartitionCore;
use crate::numeric::digits::DigitBuf;
use crate::numeric::Radix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuffixState {
    Whitespace,
    SignSeen,
    Digits,
    ColonSeen,
    LetterSeen,
}

/// Grammar for `ws* sign? digits(radix) ':' ('B' | 'O' | 'H')`.
///
/// The base is unknown until the suffix letter arrives, so digits are
/// collected from the hexadecimal superset and validated against the
/// announced base at the end. The `:letter` pair must be the last two
/// characters of the text; anything after it withdraws credit back to the
/// colon, and a missing suffix leaves the attempt with no credit at all.
#[derive(Debug, Clone)]
pub struct RadixSuffixPartition {
    pub(crate) core: PartitionCore,
    state: SuffixState,
    sign: Option<char>,
    digit_chars: SmallVec<[char; 24]>,
    /// Byte index of the first digit; digits are ASCII and contiguous
    digit_start: usize,
    colon_index: usize,
    radix: Option<Radix>,
    values: DigitBuf,
}

impl RadixSuffixPartition {
    pub fn new() -> Self {
        Self {
            core: PartitionCore::new(),
            state: SuffixState::Whitespace,
            sign: None,
            digit_chars: SmallVec::new(),
            digit_start: 0,
            colon_index: 0,
            radix: None,
            values: DigitBuf::new(),
        }
    }

    pub fn advance(&mut self, index: usize, ch: char) {
        if self.core.is_failed() {
            return;
        }
        match self.state {
            SuffixState::Whitespace => {
                if ch.is_whitespace() {
                    self.core.whitespace_end = index + ch.len_utf8();
                } else if ch == '+' || ch == '-' {
                    self.sign = Some(ch);
                    self.state = SuffixState::SignSeen;
                } else {
                    self.start_digits(index, ch);
                }
            }
            SuffixState::SignSeen => self.start_digits(index, ch),
            SuffixState::Digits => {
                if Radix::Hexadecimal.is_digit(ch) {
                    self.digit_chars.push(ch);
                } else if ch == ':' {
                    self.colon_index = index;
                    self.state = SuffixState::ColonSeen;
                } else {
                    self.core.fail(index);
                }
            }
            SuffixState::ColonSeen => match Radix::from_suffix_letter(ch) {
                Some(radix) => {
                    self.radix = Some(radix);
                    self.state = SuffixState::LetterSeen;
                }
                None => self.core.fail_at_exactly(self.colon_index),
            },
            // Trailing content after a complete suffix invalidates the
            // whole tail, not just the extra character.
            SuffixState::LetterSeen => self.core.fail_at_exactly(self.colon_index),
        }
    }

    pub fn finalize(&mut self, text_len: usize) {
        self.core.text_len = text_len;
        if !self.core.is_failed() {
            match self.state {
                SuffixState::LetterSeen => self.validate_digits(),
                // The suffix never arrived; nothing gets credited.
                _ => self.core.fail_at_exactly(0),
            }
        }
        if self.core.is_failed() && self.digit_chars.is_empty() {
            self.core.fail_at_exactly(0);
        }
    }

    fn start_digits(&mut self, index: usize, ch: char) {
        if Radix::Hexadecimal.is_digit(ch) {
            self.digit_start = index;
            self.digit_chars.push(ch);
            self.state = SuffixState::Digits;
        } else {
            self.core.fail(index);
        }
    }

    /// Re-check the collected digits against the base the suffix announced.
    fn validate_digits(&mut self) {
        let Some(radix) = self.radix else {
            self.core.fail_at_exactly(0);
            return;
        };
        for (offset, &ch) in self.digit_chars.iter().enumerate() {
            match radix.digit_value(ch) {
                Some(value) => self.values.push(value),
                None => {
                    self.values.clear();
                    self.core.fail_at_exactly(self.digit_start + offset);
                    return;
                }
            }
        }
        self.core.fully_valid = true;
    }

    pub fn radix(&self) -> Option<Radix> {
        self.radix
    }

    pub(crate) fn digit_values(&self) -> &[u8] {
        &self.values
    }

    pub(crate) fn is_negative(&self) -> bool {
        self.sign == Some('-')
    }
}

impl Default for RadixSuffixPartition {
    fn default() -> Self {
        Self::new()
    }
}
