// ============================================================================
// Literal Partitions
// Shared state and the closed set of competing literal grammars
// ============================================================================
//
// Every grammar consumes the same input one character at a time and keeps
// its own verdict. The selector feeds them in lock-step and compares how
// far each one got, so a partition never sees more of the text than its
// rivals have.

use crate::domain::NumberLocale;
use crate::engine::radix_prefix::RadixPrefixPartition;
use crate::engine::radix_suffix::RadixSuffixPartition;
use crate::engine::real::RealPartition;
use crate::engine::special::SpecialPartition;

/// The four literal grammars, in tie-breaking declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// NaN or a signed infinity, spelled per the locale
    Special,
    /// Signed decimal real with optional fraction and exponent
    Real,
    /// Integer with a leading `0b`/`0x` radix prefix
    RadixPrefix,
    /// Integer with a trailing `:B`/`:O`/`:H` radix suffix
    RadixSuffix,
}

/// A fully recognized special value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialValue {
    NaN,
    PositiveInfinity,
    NegativeInfinity,
}

// ============================================================================
// Shared Partition State
// ============================================================================

/// Bookkeeping every grammar maintains: how much leading whitespace was
/// absorbed, where the first rejecting character sits, and whether the
/// grammar was still satisfied when the input ended.
#[derive(Debug, Clone, Default)]
pub(crate) struct PartitionCore {
    /// Byte index one past the absorbed leading whitespace
    pub whitespace_end: usize,
    /// First rejecting byte index; `None` while still potentially valid
    pub first_invalid: Option<usize>,
    /// Total input length, recorded at finalize
    pub text_len: usize,
    /// Whether the grammar matched the entire input
    pub fully_valid: bool,
}

impl PartitionCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the first rejecting index; later calls keep the earliest one.
    pub fn fail(&mut self, index: usize) {
        if self.first_invalid.is_none() {
            self.first_invalid = Some(index);
        }
    }

    /// Replace any recorded failure; used when a grammar retroactively
    /// withdraws credit for provisionally accepted characters.
    pub fn fail_at_exactly(&mut self, index: usize) {
        self.first_invalid = Some(index);
    }

    pub fn is_failed(&self) -> bool {
        self.first_invalid.is_some()
    }

    /// How far this grammar got: the first rejecting index, or the whole
    /// input length if it never rejected.
    pub fn comparison_index(&self) -> usize {
        self.first_invalid.unwrap_or(self.text_len)
    }
}

// ============================================================================
// Closed Partition Union
// ============================================================================

/// One candidate grammar's parse attempt, dispatched by pattern matching.
///
/// The grammar set is fixed at design time, so the variants form a closed
/// union rather than a trait hierarchy.
#[derive(Debug, Clone)]
pub enum Partition {
    Special(SpecialPartition),
    Real(RealPartition),
    RadixPrefix(RadixPrefixPartition),
    RadixSuffix(RadixSuffixPartition),
}

impl Partition {
    /// The full candidate set for one parse attempt, in declaration order.
    pub fn candidates(locale: &NumberLocale) -> [Partition; 4] {
        [
            Partition::Special(SpecialPartition::new(locale)),
            Partition::Real(RealPartition::new(locale)),
            Partition::RadixPrefix(RadixPrefixPartition::new()),
            Partition::RadixSuffix(RadixSuffixPartition::new()),
        ]
    }

    pub fn kind(&self) -> LiteralKind {
        match self {
            Partition::Special(_) => LiteralKind::Special,
            Partition::Real(_) => LiteralKind::Real,
            Partition::RadixPrefix(_) => LiteralKind::RadixPrefix,
            Partition::RadixSuffix(_) => LiteralKind::RadixSuffix,
        }
    }

    /// Feed the next character, located at byte `index`.
    pub fn advance(&mut self, index: usize, ch: char) {
        match self {
            Partition::Special(p) => p.advance(index, ch),
            Partition::Real(p) => p.advance(index, ch),
            Partition::RadixPrefix(p) => p.advance(index, ch),
            Partition::RadixSuffix(p) => p.advance(index, ch),
        }
    }

    /// Settle end-of-input obligations once the whole text has been fed.
    pub fn finalize(&mut self, text_len: usize) {
        match self {
            Partition::Special(p) => p.finalize(text_len),
            Partition::Real(p) => p.finalize(text_len),
            Partition::RadixPrefix(p) => p.finalize(text_len),
            Partition::RadixSuffix(p) => p.finalize(text_len),
        }
    }

    pub fn comparison_index(&self) -> usize {
        self.core().comparison_index()
    }

    pub fn is_fully_valid(&self) -> bool {
        self.core().fully_valid
    }

    /// Leading content this grammar absorbed without making it part of the
    /// canonical literal text.
    pub fn prolog_text(&self, text: &str) -> String {
        match self {
            Partition::Real(p) => p.prolog_text(text),
            _ => text[..self.core().whitespace_end].to_string(),
        }
    }

    /// The canonical literal text this grammar recognized before rejecting.
    pub fn recognized_text(&self, text: &str) -> String {
        match self {
            Partition::Real(p) => p.recognized_text(text),
            _ => text[self.core().whitespace_end..self.comparison_index()].to_string(),
        }
    }

    fn core(&self) -> &PartitionCore {
        match self {
            Partition::Special(p) => &p.core,
            Partition::Real(p) => &p.core,
            Partition::RadixPrefix(p) => &p.core,
            Partition::RadixSuffix(p) => &p.core,
        }
    }
}
