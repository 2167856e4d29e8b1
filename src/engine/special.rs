// ============================================================================
// Special-Value Partition
// Recognizes the locale spellings of NaN and the signed infinities
// ============================================================================

use crate::domain::NumberLocale;
use crate::engine::partition::{PartitionCore, SpecialValue};

/// One locale token being matched character-by-character
#[derive(Debug, Clone)]
struct TokenCandidate {
    token: String,
    value: SpecialValue,
    /// Byte offset of the next expected character within `token`
    matched: usize,
    alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialState {
    Whitespace,
    Token,
}

/// Grammar for `ws* sign? (localeNaN | localePosInf | localeNegInf)`.
///
/// The token must match its locale spelling exactly. A leading sign is
/// accepted only for tokens that do not already start with that sign
/// character, so `--Infinity` never parses. The sign is ignored on NaN.
#[derive(Debug, Clone)]
pub struct SpecialPartition {
    pub(crate) core: PartitionCore,
    state: SpecialState,
    sign: Option<char>,
    candidates: [TokenCandidate; 3],
    /// Longest completed token so far: resolved value and its end byte
    completed: Option<(SpecialValue, usize)>,
}

impl SpecialPartition {
    pub fn new(locale: &NumberLocale) -> Self {
        let candidate = |token: &str, value| TokenCandidate {
            token: token.to_string(),
            value,
            matched: 0,
            alive: true,
        };
        Self {
            core: PartitionCore::new(),
            state: SpecialState::Whitespace,
            sign: None,
            candidates: [
                candidate(&locale.nan, SpecialValue::NaN),
                candidate(&locale.positive_infinity, SpecialValue::PositiveInfinity),
                candidate(&locale.negative_infinity, SpecialValue::NegativeInfinity),
            ],
            completed: None,
        }
    }

    pub fn advance(&mut self, index: usize, ch: char) {
        if self.core.is_failed() {
            return;
        }
        match self.state {
            SpecialState::Whitespace => {
                if ch.is_whitespace() {
                    self.core.whitespace_end = index + ch.len_utf8();
                    return;
                }
                self.state = SpecialState::Token;
                if ch == '+' || ch == '-' {
                    self.sign = Some(ch);
                    for candidate in &mut self.candidates {
                        if candidate.token.starts_with(ch) {
                            candidate.alive = false;
                        }
                    }
                    return;
                }
                self.match_token(index, ch);
            }
            SpecialState::Token => self.match_token(index, ch),
        }
    }

    fn match_token(&mut self, index: usize, ch: char) {
        let mut any_alive = false;
        for candidate in &mut self.candidates {
            if !candidate.alive {
                continue;
            }
            let expected = candidate.token[candidate.matched..].chars().next();
            if expected == Some(ch) {
                candidate.matched += ch.len_utf8();
                if candidate.matched == candidate.token.len() {
                    candidate.alive = false;
                    self.completed = Some((candidate.value, index + ch.len_utf8()));
                } else {
                    any_alive = true;
                }
            } else {
                candidate.alive = false;
            }
        }
        if !any_alive && self.completed.is_none() {
            // Deviation before any token completed rejects right here.
            self.core.fail(index);
        } else if !any_alive {
            // A token completed earlier; everything beyond its end is
            // trailing content.
            let end = self.completed.map(|(_, end)| end).unwrap_or(index);
            if end <= index {
                self.core.fail(end);
            }
        }
    }

    pub fn finalize(&mut self, text_len: usize) {
        self.core.text_len = text_len;
        if self.core.is_failed() {
            return;
        }
        match self.completed {
            Some((_, end)) if end == text_len => self.core.fully_valid = true,
            Some((_, end)) => self.core.fail(end),
            // Token still in progress (or nothing seen): never failed, so
            // the comparison index stays at the text length.
            None => {}
        }
    }

    /// The recognized special value with the leading sign applied.
    pub(crate) fn value(&self) -> Option<SpecialValue> {
        self.completed.map(|(value, _)| match value {
            SpecialValue::NaN => SpecialValue::NaN,
            _ => {
                let negative =
                    self.sign == Some('-') || value == SpecialValue::NegativeInfinity;
                if negative {
                    SpecialValue::NegativeInfinity
                } else {
                    SpecialValue::PositiveInfinity
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> SpecialPartition {
        let locale = NumberLocale::invariant();
        let mut partition = SpecialPartition::new(&locale);
        for (index, ch) in text.char_indices() {
            partition.advance(index, ch);
        }
        partition.finalize(text.len());
        partition
    }

    #[test]
    fn test_exact_tokens() {
        let p = run("NaN");
        assert!(p.core.fully_valid);
        assert_eq!(p.value(), Some(SpecialValue::NaN));

        let p = run("Infinity");
        assert!(p.core.fully_valid);
        assert_eq!(p.value(), Some(SpecialValue::PositiveInfinity));

        let p = run("-Infinity");
        assert!(p.core.fully_valid);
        assert_eq!(p.value(), Some(SpecialValue::NegativeInfinity));
    }

    #[test]
    fn test_sign_handling() {
        let p = run("+Infinity");
        assert!(p.core.fully_valid);
        assert_eq!(p.value(), Some(SpecialValue::PositiveInfinity));

        // The sign on NaN is accepted and ignored.
        let p = run(" -NaN");
        assert!(p.core.fully_valid);
        assert_eq!(p.value(), Some(SpecialValue::NaN));

        // A second sign cannot restart the negative-infinity token.
        let p = run("--Infinity");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 1);
    }

    #[test]
    fn test_case_sensitive_match() {
        let p = run("nan");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 0);
    }

    #[test]
    fn test_deviation_mid_token() {
        let p = run("Infix");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 4);
        assert_eq!(p.value(), None);
    }

    #[test]
    fn test_trailing_content_after_token() {
        let p = run("InfinityX");
        assert!(!p.core.fully_valid);
        assert_eq!(p.core.comparison_index(), 8);
        assert_eq!(p.value(), Some(SpecialValue::PositiveInfinity));
    }

    #[test]
    fn test_leading_whitespace_absorbed() {
        let p = run("  NaN");
        assert!(p.core.fully_valid);
        assert_eq!(p.core.whitespace_end, 2);
    }

    #[test]
    fn test_incomplete_token_at_end() {
        let p = run("Infin");
        assert!(!p.core.fully_valid);
        assert_eq!(p.value(), None);
        // Never rejected mid-stream, so the index covers the whole text.
        assert_eq!(p.core.comparison_index(), 5);
    }

    #[test]
    fn test_custom_locale_tokens() {
        let locale = NumberLocale::invariant().with_infinity_texts("inf", "-inf");
        let mut p = SpecialPartition::new(&locale);
        for (index, ch) in "-inf".char_indices() {
            p.advance(index, ch);
        }
        p.finalize(4);
        assert!(p.core.fully_valid);
        assert_eq!(p.value(), Some(SpecialValue::NegativeInfinity));
    }
}
