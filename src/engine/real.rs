// ============================================================================
// Real-Number Partition
// Signed decimal literals with optional fraction and exponent parts
// ============================================================================

use crate::domain::NumberLocale;
use crate::engine::partition::PartitionCore;
use crate::numeric::digits::DigitBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RealState {
    Whitespace,
    SignSeen,
    /// Leading zeroes held provisionally; they become discarded prolog or
    /// the canonical leading digit once the next character decides
    ZeroRun,
    Integer,
    Fraction,
    /// `e`/`E` consumed, nothing after it yet
    ExponentMarker,
    /// Exponent sign consumed, still waiting for the first digit
    ExponentSign,
    ExponentDigits,
}

/// Grammar for `ws* sign? (digits ('.' digits?)? | '.' digits)
/// (('e'|'E') sign? digits)?` with the separator taken from the locale.
///
/// A leading run of zeroes is absorbed provisionally: a nonzero digit
/// reclassifies the whole run as discarded prolog, while a separator,
/// exponent marker or end of input gives exactly one zero back as the
/// canonical leading digit. An exponent marker without any digit after it
/// withdraws credit back to the marker itself.
#[derive(Debug, Clone)]
pub struct RealPartition {
    pub(crate) core: PartitionCore,
    separator: char,
    state: RealState,
    sign: Option<char>,
    /// Provisional zero run as a byte span
    zero_run: Option<(usize, usize)>,
    /// Confirmed discarded leading zeroes as a byte span
    discarded_zeros: (usize, usize),
    /// First byte of the canonical literal text after sign and discards
    canonical_start: usize,
    integer_digits: DigitBuf,
    fraction_digits: DigitBuf,
    exponent_digits: DigitBuf,
    exponent_sign: Option<char>,
    exponent_marker: Option<usize>,
    /// First byte after the exponent marker
    exponent_span_start: Option<usize>,
}

impl RealPartition {
    pub fn new(locale: &NumberLocale) -> Self {
        Self {
            core: PartitionCore::new(),
            separator: locale.decimal_separator,
            state: RealState::Whitespace,
            sign: None,
            zero_run: None,
            discarded_zeros: (0, 0),
            canonical_start: 0,
            integer_digits: DigitBuf::new(),
            fraction_digits: DigitBuf::new(),
            exponent_digits: DigitBuf::new(),
            exponent_sign: None,
            exponent_marker: None,
            exponent_span_start: None,
        }
    }

    pub fn advance(&mut self, index: usize, ch: char) {
        if self.core.is_failed() {
            return;
        }
        match self.state {
            RealState::Whitespace => {
                if ch.is_whitespace() {
                    self.core.whitespace_end = index + ch.len_utf8();
                } else if ch == '+' || ch == '-' {
                    self.sign = Some(ch);
                    self.state = RealState::SignSeen;
                } else {
                    self.start_number(index, ch);
                }
            }
            RealState::SignSeen => self.start_number(index, ch),
            RealState::ZeroRun => {
                if ch == '0' {
                    if let Some((_, end)) = &mut self.zero_run {
                        *end = index + 1;
                    }
                } else if ch.is_ascii_digit() {
                    // A significant digit makes the whole run prolog.
                    let (start, end) = self.zero_run.take().unwrap_or((index, index));
                    self.discarded_zeros = (start, end);
                    self.canonical_start = index;
                    self.push_digit(ch, RealState::Integer);
                    self.state = RealState::Integer;
                } else if ch == self.separator {
                    self.resolve_zero_run_with_giveback();
                    self.state = RealState::Fraction;
                } else if ch == 'e' || ch == 'E' {
                    self.resolve_zero_run_with_giveback();
                    self.begin_exponent(index);
                } else {
                    self.resolve_zero_run_with_giveback();
                    self.core.fail(index);
                }
            }
            RealState::Integer => {
                if ch.is_ascii_digit() {
                    self.push_digit(ch, RealState::Integer);
                } else if ch == self.separator {
                    self.state = RealState::Fraction;
                } else if ch == 'e' || ch == 'E' {
                    self.begin_exponent(index);
                } else {
                    self.core.fail(index);
                }
            }
            RealState::Fraction => {
                if ch.is_ascii_digit() {
                    self.push_digit(ch, RealState::Fraction);
                } else if (ch == 'e' || ch == 'E') && self.has_significand_digit() {
                    self.begin_exponent(index);
                } else {
                    self.core.fail(index);
                }
            }
            RealState::ExponentMarker => {
                if ch == '+' || ch == '-' {
                    self.exponent_sign = Some(ch);
                    self.exponent_span_start = Some(index);
                    self.state = RealState::ExponentSign;
                } else if ch.is_ascii_digit() {
                    self.exponent_span_start = Some(index);
                    self.push_digit(ch, RealState::ExponentDigits);
                    self.state = RealState::ExponentDigits;
                } else {
                    self.withdraw_exponent();
                }
            }
            RealState::ExponentSign => {
                if ch.is_ascii_digit() {
                    self.push_digit(ch, RealState::ExponentDigits);
                    self.state = RealState::ExponentDigits;
                } else {
                    self.withdraw_exponent();
                }
            }
            RealState::ExponentDigits => {
                if ch.is_ascii_digit() {
                    self.push_digit(ch, RealState::ExponentDigits);
                } else {
                    self.core.fail(index);
                }
            }
        }
    }

    pub fn finalize(&mut self, text_len: usize) {
        self.core.text_len = text_len;
        if !self.core.is_failed() {
            match self.state {
                RealState::Whitespace | RealState::SignSeen => self.core.fail_at_exactly(0),
                RealState::ZeroRun => {
                    self.resolve_zero_run_with_giveback();
                    self.core.fully_valid = true;
                }
                RealState::Integer | RealState::ExponentDigits => self.core.fully_valid = true,
                RealState::Fraction => {
                    if self.has_significand_digit() {
                        self.core.fully_valid = true;
                    } else {
                        self.core.fail_at_exactly(0);
                    }
                }
                RealState::ExponentMarker | RealState::ExponentSign => self.withdraw_exponent(),
            }
        }
        // A failed attempt with no significand digit recognized nothing.
        if self.core.is_failed() && !self.has_significand_digit() {
            self.core.fail_at_exactly(0);
        }
    }

    fn start_number(&mut self, index: usize, ch: char) {
        if ch == '0' {
            self.zero_run = Some((index, index + 1));
            self.state = RealState::ZeroRun;
        } else if ch.is_ascii_digit() {
            self.canonical_start = index;
            self.push_digit(ch, RealState::Integer);
            self.state = RealState::Integer;
        } else if ch == self.separator {
            self.canonical_start = index;
            self.state = RealState::Fraction;
        } else {
            self.core.fail(index);
        }
    }

    /// Reclassify the zero run as prolog except for its last zero, which
    /// becomes the canonical leading integer digit.
    fn resolve_zero_run_with_giveback(&mut self) {
        if let Some((start, end)) = self.zero_run.take() {
            self.discarded_zeros = (start, end - 1);
            self.canonical_start = end - 1;
            self.integer_digits.push(0);
        }
    }

    fn begin_exponent(&mut self, index: usize) {
        self.exponent_marker = Some(index);
        self.state = RealState::ExponentMarker;
    }

    /// An exponent marker with no digit after it gets no credit at all.
    fn withdraw_exponent(&mut self) {
        if let Some(marker) = self.exponent_marker {
            self.core.fail_at_exactly(marker);
        }
    }

    fn push_digit(&mut self, ch: char, target: RealState) {
        let value = (ch as u8) - b'0';
        match target {
            RealState::Integer => self.integer_digits.push(value),
            RealState::Fraction => self.fraction_digits.push(value),
            _ => self.exponent_digits.push(value),
        }
    }

    fn has_significand_digit(&self) -> bool {
        !self.integer_digits.is_empty() || !self.fraction_digits.is_empty()
    }

    pub(crate) fn integer_values(&self) -> &[u8] {
        &self.integer_digits
    }

    pub(crate) fn fraction_values(&self) -> &[u8] {
        &self.fraction_digits
    }

    pub(crate) fn exponent_values(&self) -> &[u8] {
        &self.exponent_digits
    }

    pub(crate) fn is_negative(&self) -> bool {
        self.sign == Some('-')
    }

    pub(crate) fn is_exponent_negative(&self) -> bool {
        self.exponent_sign == Some('-')
    }

    /// Whitespace plus the discarded leading zeroes.
    pub fn prolog_text(&self, text: &str) -> String {
        let mut prolog = text[..self.core.whitespace_end].to_string();
        prolog.push_str(&text[self.discarded_zeros.0..self.discarded_zeros.1]);
        prolog
    }

    /// The canonical literal text: the sign followed by the recognized span.
    pub fn recognized_text(&self, text: &str) -> String {
        let end = self.core.comparison_index();
        if end == 0 {
            return String::new();
        }
        let mut recognized = String::new();
        if let Some(sign) = self.sign {
            recognized.push(sign);
        }
        recognized.push_str(&text[self.canonical_start..end]);
        recognized
    }

    /// Exponent sign and digits as written, when an exponent was credited.
    pub fn exponent_span<'a>(&self, text: &'a str) -> Option<&'a str> {
        let end = self.core.comparison_index();
        self.exponent_span_start
            .filter(|&start| end >= start)
            .map(|start| &text[start..end])
    }
}
