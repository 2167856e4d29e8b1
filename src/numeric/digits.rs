// ============================================================================
// Digit-String Primitives
// Radix-agnostic long arithmetic over most-significant-first digit strings
// ============================================================================
//
// Both parsing (decimal text -> binary bits) and rendering (bits -> decimal
// text) funnel exclusively through these functions, so radix conversion
// logic lives in exactly one place and is independently testable.
//
// The `&str` entry points validate every character against the radix and
// return `NumericError::InvalidDigit` otherwise. The crate-internal
// `*_in_place` cores operate on already-validated digit values and are
// total; conversion and rendering use those to avoid re-validation.

use smallvec::SmallVec;

use crate::numeric::errors::{NumericError, NumericResult};
use crate::numeric::radix::Radix;

/// Digit values (not characters), most significant first.
pub(crate) type DigitBuf = SmallVec<[u8; 24]>;

// ============================================================================
// Validated parsing and formatting of digit values
// ============================================================================

/// Map a digit string to its values, rejecting alien characters.
pub(crate) fn parse_values(text: &str, radix: Radix) -> NumericResult<DigitBuf> {
    if text.is_empty() {
        return Err(NumericError::EmptyDigits);
    }
    let mut values = DigitBuf::with_capacity(text.len());
    for c in text.chars() {
        match radix.digit_value(c) {
            Some(v) => values.push(v),
            None => return Err(NumericError::InvalidDigit(c)),
        }
    }
    Ok(values)
}

/// Render digit values back to text (uppercase for values 10..=15).
pub(crate) fn values_to_string(values: &[u8]) -> String {
    values.iter().map(|&v| value_char(v)).collect()
}

#[inline]
fn value_char(v: u8) -> char {
    if v < 10 {
        (b'0' + v) as char
    } else {
        (b'A' + v - 10) as char
    }
}

// ============================================================================
// In-place cores over digit values
// ============================================================================

/// True when every digit is zero (or the slice is empty).
#[inline]
pub(crate) fn is_zero_values(values: &[u8]) -> bool {
    values.iter().all(|&v| v == 0)
}

/// Long division by 2, most significant digit first. Length-preserving;
/// returns the remainder bit.
pub(crate) fn halve_in_place(values: &mut [u8], base: u8) -> bool {
    let mut remainder = 0u8;
    for v in values.iter_mut() {
        let acc = remainder * base + *v;
        *v = acc / 2;
        remainder = acc % 2;
    }
    remainder != 0
}

/// Long multiplication by 2 with incoming carry, least significant digit
/// first internally. Length-preserving; returns the overflow carry.
pub(crate) fn double_in_place(values: &mut [u8], base: u8, carry_in: bool) -> bool {
    let mut carry = u8::from(carry_in);
    for v in values.iter_mut().rev() {
        let acc = *v * 2 + carry;
        *v = acc % base;
        carry = acc / base;
    }
    carry != 0
}

/// Add one, growing the buffer by a leading `1` when the carry ripples out.
/// An empty buffer increments to `[1]`.
pub(crate) fn increment_in_place(values: &mut DigitBuf, base: u8) {
    for v in values.iter_mut().rev() {
        if *v + 1 < base {
            *v += 1;
            return;
        }
        *v = 0;
    }
    values.insert(0, 1);
}

/// Subtract one, length-preserving. The caller must rule out all-zero input.
pub(crate) fn decrement_in_place(values: &mut [u8], base: u8) -> NumericResult<()> {
    if is_zero_values(values) {
        return Err(NumericError::DigitUnderflow);
    }
    for v in values.iter_mut().rev() {
        if *v > 0 {
            *v -= 1;
            return Ok(());
        }
        *v = base - 1;
    }
    // Unreachable: a nonzero digit exists above every borrowed position.
    Ok(())
}

/// Round off the last digit of a fraction, half toward the truncated value.
pub(crate) fn round_values(values: &[u8], base: u8, keep_trailing_zeroes: bool) -> DigitBuf {
    let mut out: DigitBuf = values[..values.len() - 1].iter().copied().collect();
    let dropped = values[values.len() - 1];
    // Exact half ties round down, so only a strict majority rounds up.
    if dropped * 2 > base {
        increment_in_place(&mut out, base);
    }
    if !keep_trailing_zeroes {
        while out.last() == Some(&0) {
            out.pop();
        }
    }
    if out.is_empty() {
        out.push(0);
    }
    out
}

// ============================================================================
// Public digit-string operations
// ============================================================================

/// Divides a digit string by two.
///
/// The string is read most-significant-digit-first; the quotient preserves
/// the input length (leading zeroes are kept) and the returned flag is the
/// remainder bit. Iterated while the quotient still has a nonzero digit,
/// this extracts one binary bit per call, least significant first.
///
/// # Errors
///
/// `NumericError::EmptyDigits` for an empty string,
/// `NumericError::InvalidDigit` for a character outside the radix.
///
/// # Example
///
/// ```
/// use numeral_engine::numeric::{digits, Radix};
///
/// let (quotient, carry) = digits::halve("123", Radix::Decimal).unwrap();
/// assert_eq!(quotient, "061");
/// assert!(carry);
/// ```
pub fn halve(text: &str, radix: Radix) -> NumericResult<(String, bool)> {
    let mut values = parse_values(text, radix)?;
    let carry = halve_in_place(&mut values, radix.base());
    Ok((values_to_string(&values), carry))
}

/// Multiplies a digit string by two, adding an incoming carry.
///
/// The result preserves the input length; overflow out of the most
/// significant digit is returned as the carry flag. Iterated over a bit
/// field's bits from the most significant retained bit downward this
/// rebuilds decimal text; iterated over a decimal fraction it extracts one
/// binary bit per call (the carry is the next bit, most significant first).
///
/// # Errors
///
/// `NumericError::EmptyDigits` for an empty string,
/// `NumericError::InvalidDigit` for a character outside the radix.
pub fn double_with_carry(text: &str, radix: Radix, carry_in: bool) -> NumericResult<(String, bool)> {
    let mut values = parse_values(text, radix)?;
    let carry = double_in_place(&mut values, radix.base(), carry_in);
    Ok((values_to_string(&values), carry))
}

/// Adds one to a digit string, growing it by a digit when the carry
/// ripples all the way out (`"99"` becomes `"100"`).
pub fn increment(text: &str, radix: Radix) -> NumericResult<String> {
    let mut values = parse_values(text, radix)?;
    increment_in_place(&mut values, radix.base());
    Ok(values_to_string(&values))
}

/// Subtracts one from a digit string, length-preserving (`"100"` becomes
/// `"099"`). An all-zero string is a `DigitUnderflow` error: these strings
/// are unsigned magnitudes.
pub fn decrement(text: &str, radix: Radix) -> NumericResult<String> {
    let mut values = parse_values(text, radix)?;
    decrement_in_place(&mut values, radix.base())?;
    Ok(values_to_string(&values))
}

/// Rounds off the last digit of a string of fraction digits.
///
/// The text is treated as the digits after an implicit point. The final
/// digit is dropped and the remainder is rounded to nearest with **exact
/// half ties rounding down**, toward the truncated value; this is the one
/// rounding rule every fractional-to-decimal conversion in the crate
/// reuses. When every digit equals `radix - 1` the increment carries all
/// the way out and the result collapses to the single digit `"1"` (one
/// whole unit), so callers must tolerate a result shorter or longer than
/// `input length - 1`. Unless `keep_trailing_zeroes` is set, trailing
/// zeroes of the rounded fraction are trimmed.
///
/// # Example
///
/// ```
/// use numeral_engine::numeric::{digits, Radix};
///
/// // 0.45 rounds to 0.4: the dropped 5 is an exact half.
/// assert_eq!(digits::round_to_nearest("45", Radix::Decimal, false).unwrap(), "4");
/// // 0.999 carries out to 1.
/// assert_eq!(digits::round_to_nearest("999", Radix::Decimal, false).unwrap(), "1");
/// ```
pub fn round_to_nearest(
    text: &str,
    radix: Radix,
    keep_trailing_zeroes: bool,
) -> NumericResult<String> {
    let values = parse_values(text, radix)?;
    let rounded = round_values(&values, radix.base(), keep_trailing_zeroes);
    Ok(values_to_string(&rounded))
}
