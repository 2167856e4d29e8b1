// ============================================================================
// Number
// Precision-bounded value built from one recognized literal
// ============================================================================

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::config::{self, NumericContext, Rounding};
use crate::domain::locale::NumberLocale;
use crate::engine::partition::{Partition, SpecialValue};
use crate::engine::selector::PartitionSelector;
use crate::numeric::digits::{double_in_place, halve_in_place, is_zero_values, DigitBuf};
use crate::numeric::magnitude::Magnitude;
use crate::numeric::{BitField, NumericError, NumericResult, Radix};

// ============================================================================
// Value Classification
// ============================================================================

/// Which of the mutually exclusive value classes a `Number` holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    NaN,
    PositiveInfinity,
    NegativeInfinity,
    Zero,
    Finite,
}

/// How the source literal spelled the value; suffixed integers render
/// back in their base, everything else renders decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralForm {
    Decimal,
    Suffixed(Radix),
}

// ============================================================================
// Number
// ============================================================================

/// An immutable numeric value: a sign, integer/fractional/exponent bit
/// fields at a fixed precision, or one of the special classes.
///
/// Built by literal parsing, by the special-value constructors, or as an
/// arithmetic result; never mutated in place, so values are freely
/// shareable across threads.
///
/// # Example
/// ```
/// use numeral_engine::domain::Number;
///
/// let number = Number::parse("1.25e3").unwrap();
/// assert!(!number.is_negative());
/// assert!(number.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Number {
    pub(crate) kind: NumberKind,
    pub(crate) is_significand_negative: bool,
    pub(crate) is_exponent_negative: bool,
    pub(crate) integer_field: BitField,
    pub(crate) fractional_field: BitField,
    pub(crate) exponent_field: BitField,
    pub(crate) significand_precision: u32,
    pub(crate) exponent_precision: u32,
    pub(crate) rounding: Rounding,
    pub(crate) literal_form: LiteralForm,
}

impl Number {
    // ------------------------------------------------------------------
    // Special-value constructors
    // ------------------------------------------------------------------

    pub fn nan() -> Self {
        Self::special(NumberKind::NaN, &config::thread_context())
    }

    pub fn positive_infinity() -> Self {
        Self::special(NumberKind::PositiveInfinity, &config::thread_context())
    }

    pub fn negative_infinity() -> Self {
        Self::special(NumberKind::NegativeInfinity, &config::thread_context())
    }

    pub fn zero() -> Self {
        Self::zero_with_sign(false, &config::thread_context())
    }

    pub(crate) fn special(kind: NumberKind, context: &NumericContext) -> Self {
        Self {
            kind,
            is_significand_negative: kind == NumberKind::NegativeInfinity,
            is_exponent_negative: false,
            integer_field: BitField::empty(),
            fractional_field: BitField::empty(),
            exponent_field: BitField::empty(),
            significand_precision: context.significand_bits,
            exponent_precision: context.exponent_bits,
            rounding: context.rounding,
            literal_form: LiteralForm::Decimal,
        }
    }

    pub(crate) fn zero_with_sign(negative: bool, context: &NumericContext) -> Self {
        Self {
            kind: NumberKind::Zero,
            is_significand_negative: negative,
            ..Self::special(NumberKind::Zero, context)
        }
    }

    /// A value from a machine integer, bounded by the thread context.
    pub fn from_integer(value: i64) -> Self {
        Self::parse(&value.to_string()).unwrap_or_else(|_| Self::nan())
    }

    /// A value from a `Decimal`, bounded by the thread context.
    pub fn from_decimal(value: Decimal) -> Self {
        Self::parse(&value.to_string()).unwrap_or_else(|_| Self::nan())
    }

    /// Convert back to a `Decimal`.
    ///
    /// # Errors
    ///
    /// NaN reports [`NumericError::NanOperand`]; infinities and values
    /// outside the `Decimal` range report [`NumericError::OutOfRange`].
    pub fn to_decimal(&self) -> NumericResult<Decimal> {
        match self.kind {
            NumberKind::NaN => Err(NumericError::NanOperand),
            NumberKind::PositiveInfinity | NumberKind::NegativeInfinity => {
                Err(NumericError::OutOfRange)
            }
            NumberKind::Zero => Ok(Decimal::ZERO),
            NumberKind::Finite => {
                let rendered = self
                    .format("e17")
                    .map_err(|_| NumericError::OutOfRange)?;
                Decimal::from_scientific(&rendered).map_err(|_| NumericError::OutOfRange)
            }
        }
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Strict construction from a literal under the invariant locale and
    /// the thread context.
    ///
    /// # Errors
    ///
    /// Returns the structured prolog/recognized/trailing split when the
    /// text matches no grammar or carries trailing content.
    ///
    /// # Example
    /// ```
    /// use numeral_engine::domain::Number;
    ///
    /// assert!(Number::parse("0x1F").is_ok());
    /// assert!(Number::parse("0x1Fx").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseNumberError> {
        let locale = NumberLocale::invariant();
        Self::parse_with(text, &locale, &config::thread_context())
    }

    /// Strict construction with an explicit locale and context.
    ///
    /// # Errors
    ///
    /// Same contract as [`Number::parse`].
    pub fn parse_with(
        text: &str,
        locale: &NumberLocale,
        context: &NumericContext,
    ) -> Result<Self, ParseNumberError> {
        let report = Self::scan_impl(text, locale, context, true);
        if report.invalid_tail.is_empty() {
            if let Some(number) = report.number {
                return Ok(number);
            }
        }
        Err(ParseNumberError::from_report(&report))
    }

    /// Parse-and-report: never fails, returning the structured split and
    /// the recognized value when one exists.
    pub fn scan(text: &str) -> ScanReport {
        let locale = NumberLocale::invariant();
        Self::scan_with(text, &locale, &config::thread_context())
    }

    /// [`Number::scan`] with an explicit locale and context.
    pub fn scan_with(text: &str, locale: &NumberLocale, context: &NumericContext) -> ScanReport {
        Self::scan_impl(text, locale, context, true)
    }

    fn scan_impl(
        text: &str,
        locale: &NumberLocale,
        context: &NumericContext,
        retry_recognized: bool,
    ) -> ScanReport {
        let selection = PartitionSelector::new(locale).run(text);
        let Some(winner) = selection.winner else {
            return ScanReport {
                prolog: String::new(),
                recognized: String::new(),
                invalid_tail: text.to_string(),
                number: None,
                exponent_offset: None,
            };
        };

        let prolog = winner.prolog_text(text);
        let recognized = winner.recognized_text(text);
        let invalid_tail = text[winner.comparison_index()..].to_string();
        let exponent_offset = match &winner {
            Partition::Real(real) => real
                .exponent_span(text)
                .map(|span| recognized.len() - span.len()),
            _ => None,
        };

        let number = if winner.is_fully_valid() {
            Self::from_partition(&winner, context)
        } else if retry_recognized && !recognized.is_empty() {
            // The truncated span may itself be a complete literal, as in
            // `123abc` or `0x1Fx`.
            let retry = Self::scan_impl(&recognized, locale, context, false);
            if retry.invalid_tail.is_empty() {
                retry.number
            } else {
                None
            }
        } else {
            None
        };

        ScanReport {
            prolog,
            recognized,
            invalid_tail,
            number,
            exponent_offset,
        }
    }

    fn from_partition(partition: &Partition, context: &NumericContext) -> Option<Self> {
        match partition {
            Partition::Special(p) => p.value().map(|value| {
                let kind = match value {
                    SpecialValue::NaN => NumberKind::NaN,
                    SpecialValue::PositiveInfinity => NumberKind::PositiveInfinity,
                    SpecialValue::NegativeInfinity => NumberKind::NegativeInfinity,
                };
                Self::special(kind, context)
            }),
            Partition::Real(p) => Some(Self::from_real_partition(p, context)),
            Partition::RadixPrefix(p) => p.radix().map(|radix| {
                Self::from_radix_values(
                    p.digit_values(),
                    radix,
                    p.is_negative(),
                    LiteralForm::Decimal,
                    context,
                )
            }),
            Partition::RadixSuffix(p) => p.radix().map(|radix| {
                Self::from_radix_values(
                    p.digit_values(),
                    radix,
                    p.is_negative(),
                    LiteralForm::Suffixed(radix),
                    context,
                )
            }),
        }
    }

    fn from_real_partition(p: &crate::engine::RealPartition, context: &NumericContext) -> Self {
        let significand_budget = (!context.unbounded).then_some(context.significand_bits);
        let exponent_budget = (!context.unbounded).then_some(context.exponent_bits);

        let (integer_field, integer_inexact) =
            convert_integer_span(p.integer_values(), Radix::Decimal, significand_budget);
        let (fractional_field, fraction_inexact) =
            convert_fraction_span(p.fraction_values(), context.significand_bits);
        let (exponent_field, exponent_inexact) =
            convert_integer_span(p.exponent_values(), Radix::Decimal, exponent_budget);

        if integer_inexact || fraction_inexact || exponent_inexact {
            config::raise_inexact();
        }
        if integer_field.is_zero() && fractional_field.is_zero() {
            return Self::zero_with_sign(p.is_negative(), context);
        }

        Self {
            kind: NumberKind::Finite,
            is_significand_negative: p.is_negative(),
            is_exponent_negative: p.is_exponent_negative() && !exponent_field.is_zero(),
            integer_field,
            fractional_field,
            exponent_field,
            significand_precision: context.significand_bits,
            exponent_precision: context.exponent_bits,
            rounding: context.rounding,
            literal_form: LiteralForm::Decimal,
        }
    }

    fn from_radix_values(
        values: &[u8],
        radix: Radix,
        negative: bool,
        literal_form: LiteralForm,
        context: &NumericContext,
    ) -> Self {
        let budget = (!context.unbounded).then_some(context.significand_bits);
        let (integer_field, inexact) = convert_integer_span(values, radix, budget);
        if inexact {
            config::raise_inexact();
        }
        if integer_field.is_zero() {
            return Self::zero_with_sign(negative, context);
        }
        let (fractional_field, _) = convert_fraction_span(&[], context.significand_bits);

        Self {
            kind: NumberKind::Finite,
            is_significand_negative: negative,
            is_exponent_negative: false,
            integer_field,
            fractional_field,
            exponent_field: BitField::new(),
            significand_precision: context.significand_bits,
            exponent_precision: context.exponent_bits,
            rounding: context.rounding,
            literal_form,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.kind == NumberKind::NaN
    }

    #[inline]
    pub fn is_positive_infinity(&self) -> bool {
        self.kind == NumberKind::PositiveInfinity
    }

    #[inline]
    pub fn is_negative_infinity(&self) -> bool {
        self.kind == NumberKind::NegativeInfinity
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.kind == NumberKind::Zero
    }

    /// True for zero and ordinary values, false for NaN and infinities.
    #[inline]
    pub fn is_finite(&self) -> bool {
        matches!(self.kind, NumberKind::Zero | NumberKind::Finite)
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.is_significand_negative
    }

    #[inline]
    pub fn is_exponent_negative(&self) -> bool {
        self.is_exponent_negative
    }

    pub fn integer_field(&self) -> &BitField {
        &self.integer_field
    }

    pub fn fractional_field(&self) -> &BitField {
        &self.fractional_field
    }

    pub fn exponent_field(&self) -> &BitField {
        &self.exponent_field
    }

    #[inline]
    pub fn significand_precision(&self) -> u32 {
        self.significand_precision
    }

    #[inline]
    pub fn exponent_precision(&self) -> u32 {
        self.exponent_precision
    }

    #[inline]
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    pub fn literal_form(&self) -> LiteralForm {
        self.literal_form
    }

    // ------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------

    /// Three-way comparison.
    ///
    /// # Errors
    ///
    /// A NaN operand reports [`NumericError::NanOperand`]: no total order
    /// includes NaN.
    pub fn compare(&self, other: &Number) -> NumericResult<Ordering> {
        if self.is_nan() || other.is_nan() {
            return Err(NumericError::NanOperand);
        }
        let ordering = match self.comparison_rank().cmp(&other.comparison_rank()) {
            Ordering::Equal if self.kind == NumberKind::Finite => self.compare_fields(other),
            ordering => ordering,
        };
        Ok(ordering)
    }

    /// Signed class rank: infinities dominate, zero sits between the
    /// finite signs, and equal-ranked finite values go to field compare.
    fn comparison_rank(&self) -> i8 {
        match self.kind {
            NumberKind::NegativeInfinity => -2,
            NumberKind::PositiveInfinity => 2,
            NumberKind::Zero | NumberKind::NaN => 0,
            NumberKind::Finite => {
                if self.is_significand_negative {
                    -1
                } else {
                    1
                }
            }
        }
    }

    /// Field-by-field magnitude comparison, inverted for a shared
    /// negative sign.
    fn compare_fields(&self, other: &Number) -> Ordering {
        let by_magnitude = self
            .integer_field
            .magnitude_cmp(&other.integer_field)
            .then_with(|| fraction_cmp(self, other))
            .then_with(|| self.exponent_field.magnitude_cmp(&other.exponent_field));
        if self.is_significand_negative {
            by_magnitude.reverse()
        } else {
            by_magnitude
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other)
            .map_or(false, |ordering| ordering == Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl FromStr for Number {
    type Err = ParseNumberError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

/// Fraction fields store one bit per precision bit, so operands parsed
/// under different precisions align at the binary point by scaling each
/// side with the other's width.
fn fraction_cmp(a: &Number, b: &Number) -> Ordering {
    let width_a = a.fractional_field.aligned_len();
    let width_b = b.fractional_field.aligned_len();
    if width_a == width_b {
        return a.fractional_field.magnitude_cmp(&b.fractional_field);
    }
    Magnitude::from_bitfield(&a.fractional_field)
        .shl(width_b)
        .cmp(&Magnitude::from_bitfield(&b.fractional_field).shl(width_a))
}

// ============================================================================
// Span Conversion
// ============================================================================

/// Convert an integer digit span into a bit field, one bit per halving,
/// least significant bit first. Once the budget is exhausted the window
/// slides upward by dropping the lowest stored bit.
fn convert_integer_span(
    values: &[u8],
    radix: Radix,
    budget: Option<u32>,
) -> (BitField, bool) {
    let mut digits: DigitBuf = values.iter().copied().collect();
    let mut field = BitField::new();
    let mut inexact = false;
    let base = radix.base();
    let mut index = 0usize;
    while !is_zero_values(&digits) {
        let carry = halve_in_place(&mut digits, base);
        match budget {
            Some(limit) if index >= limit as usize => {
                inexact |= field.get(0);
                field.decrease_precision();
                field.set(limit as usize - 1, carry);
            }
            _ => field.set(index, carry),
        }
        index += 1;
    }
    (field, inexact)
}

/// Convert a decimal fraction span into exactly `bits` stored bits, most
/// significant first: each doubling carries out the next bit below the
/// binary point. Leftover digits mean the value was truncated.
fn convert_fraction_span(values: &[u8], bits: u32) -> (BitField, bool) {
    let mut digits: DigitBuf = values.iter().copied().collect();
    let mut field = BitField::new();
    let width = bits as usize;
    for position in 0..width {
        let carry = double_in_place(&mut digits, 10, false);
        field.set(width - 1 - position, carry);
    }
    (field, !is_zero_values(&digits))
}

// ============================================================================
// Scan Report
// ============================================================================

/// Structured outcome of a parse-and-report run: the discarded prolog,
/// the canonical recognized text, the invalid trailing text, and the
/// recognized value when the canonical text forms a complete literal.
#[derive(Debug, Clone)]
pub struct ScanReport {
    prolog: String,
    recognized: String,
    invalid_tail: String,
    number: Option<Number>,
    /// Byte offset into `recognized` where the exponent text begins
    exponent_offset: Option<usize>,
}

impl ScanReport {
    /// Leading whitespace and zeroes excluded from the canonical text.
    pub fn prolog(&self) -> &str {
        &self.prolog
    }

    /// The canonical literal text the winning grammar recognized.
    pub fn recognized(&self) -> &str {
        &self.recognized
    }

    /// Everything after the recognized span.
    pub fn invalid_tail(&self) -> &str {
        &self.invalid_tail
    }

    pub fn number(&self) -> Option<&Number> {
        self.number.as_ref()
    }

    pub fn into_number(self) -> Option<Number> {
        self.number
    }

    /// Whether the entire input formed one valid literal.
    pub fn is_fully_valid(&self) -> bool {
        self.number.is_some() && self.invalid_tail.is_empty()
    }

    /// Recognized text up to and including the exponent marker.
    pub fn pre_exponent_text(&self) -> &str {
        match self.exponent_offset {
            Some(offset) => &self.recognized[..offset],
            None => &self.recognized,
        }
    }

    /// The exponent sign and digits as written, empty without one.
    pub fn exponent_text(&self) -> &str {
        match self.exponent_offset {
            Some(offset) => &self.recognized[offset..],
            None => "",
        }
    }
}

// ============================================================================
// Parse Error
// ============================================================================

/// Strict-construction failure carrying the same split a scan reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNumberError {
    prolog: String,
    recognized: String,
    invalid_tail: String,
}

impl ParseNumberError {
    fn from_report(report: &ScanReport) -> Self {
        Self {
            prolog: report.prolog.clone(),
            recognized: report.recognized.clone(),
            invalid_tail: report.invalid_tail.clone(),
        }
    }

    pub fn prolog(&self) -> &str {
        &self.prolog
    }

    pub fn recognized(&self) -> &str {
        &self.recognized
    }

    pub fn invalid_tail(&self) -> &str {
        &self.invalid_tail
    }
}

impl fmt::Display for ParseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.recognized.is_empty() && self.invalid_tail.is_empty() {
            write!(f, "empty numeric literal")
        } else if self.recognized.is_empty() {
            write!(f, "unrecognized numeric literal {:?}", self.invalid_tail)
        } else if self.invalid_tail.is_empty() {
            write!(f, "invalid numeric literal {:?}", self.recognized)
        } else {
            write!(
                f,
                "invalid trailing text {:?} after numeric literal {:?}",
                self.invalid_tail, self.recognized
            )
        }
    }
}

impl std::error::Error for ParseNumberError {}
