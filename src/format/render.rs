// ============================================================================
// Rendering
// Bit fields back to text under a format spec and locale
// ============================================================================
//
// The significand is first decomposed into its exact decimal digits (both
// stored fields convert exactly; only the format's precision rounds), then
// laid out by the format kind. The general form preserves the stored
// exponent field as a literal suffix; the explicit scientific and fixed
// forms fold it into the printed exponent or the point position.

use std::fmt;

use crate::domain::locale::NumberLocale;
use crate::domain::number::{LiteralForm, Number, NumberKind};
use crate::format::spec::{FormatKind, FormatResult, FormatSpec};
use crate::numeric::digits::{
    double_in_place, halve_in_place, is_zero_values, round_values, values_to_string, DigitBuf,
};
use crate::numeric::magnitude::Magnitude;
use crate::numeric::{BitField, Radix};

/// Fixed-form rendering pads zeroes proportional to the folded exponent,
/// so exponents beyond this fall back to the general form.
const FOLD_LIMIT: i128 = 1 << 20;

/// Render a number under an already-parsed format spec.
pub fn render(number: &Number, spec: &FormatSpec, locale: &NumberLocale) -> String {
    match number.kind {
        NumberKind::NaN => locale.nan.clone(),
        NumberKind::PositiveInfinity => locale.positive_infinity.clone(),
        NumberKind::NegativeInfinity => locale.negative_infinity.clone(),
        NumberKind::Zero => render_zero(number, spec, locale),
        NumberKind::Finite => match spec.kind {
            FormatKind::General => render_general(number, spec, locale),
            FormatKind::Scientific => render_scientific(number, spec, locale),
            FormatKind::Fixed => render_fixed(number, spec, locale),
        },
    }
}

impl Number {
    /// Render under the invariant locale.
    ///
    /// # Errors
    ///
    /// Fails only on a malformed format string; see [`FormatSpec::parse`].
    ///
    /// # Example
    /// ```
    /// use numeral_engine::domain::Number;
    ///
    /// let number = Number::parse("3.25").unwrap();
    /// assert_eq!(number.format("F1").unwrap(), "3.2");
    /// ```
    pub fn format(&self, format: &str) -> FormatResult<String> {
        self.format_with(format, &NumberLocale::invariant())
    }

    /// Render under an explicit locale.
    ///
    /// # Errors
    ///
    /// Same contract as [`Number::format`].
    pub fn format_with(&self, format: &str, locale: &NumberLocale) -> FormatResult<String> {
        let spec = FormatSpec::parse(format)?;
        Ok(render(self, &spec, locale))
    }
}

/// The default form: shortest faithful general rendering under the
/// invariant locale.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = render(self, &FormatSpec::default(), &NumberLocale::invariant());
        f.write_str(&rendered)
    }
}

// ============================================================================
// Decimal Decomposition
// ============================================================================

/// Exact significand digits: the value is `0.digits * 10^scale`, first
/// digit nonzero. Digits are empty only for a zero significand.
struct DecimalParts {
    digits: DigitBuf,
    scale: i64,
}

fn decompose(number: &Number) -> DecimalParts {
    let mut all = integer_digits(&number.integer_field);
    let point = all.len() as i64;
    all.extend_from_slice(&fraction_digits(&number.fractional_field));
    let leading = all.iter().take_while(|&&d| d == 0).count();
    DecimalParts {
        digits: all[leading..].iter().copied().collect(),
        scale: point - leading as i64,
    }
}

/// Decimal digits of an integer field, most significant first and without
/// leading zeroes.
fn integer_digits(field: &BitField) -> DigitBuf {
    decimal_digits(&Magnitude::from_bitfield(field))
}

/// Doubling in a most-significant-bit-first walk rebuilds the value one bit
/// per step; overflow grows the buffer by a leading digit.
fn decimal_digits(magnitude: &Magnitude) -> DigitBuf {
    let mut digits = DigitBuf::new();
    for index in (0..magnitude.bit_length()).rev() {
        if double_in_place(&mut digits, 10, magnitude.bit(index)) {
            digits.insert(0, 1);
        }
    }
    digits
}

/// Exact decimal expansion of a fraction field. Working up from the least
/// significant stored bit, each step halves the accumulated expansion and
/// folds in the next bit as one half; binary fractions terminate, so no
/// rounding happens here.
fn fraction_digits(field: &BitField) -> DigitBuf {
    let mut digits = DigitBuf::new();
    for index in 0..field.significant_bits() {
        if halve_in_place(&mut digits, 10) {
            digits.push(5);
        }
        if field.get(index) {
            if digits.is_empty() {
                digits.push(5);
            } else {
                // After a halving the leading digit is at most 4.
                digits[0] += 5;
            }
        }
    }
    digits
}

/// Round a digit sequence to `keep` digits, half toward the shorter value.
/// The carry flag reports an increment that rippled past the first digit,
/// which shifts the scale up by one.
fn round_digits_to(digits: &[u8], keep: usize) -> (DigitBuf, bool) {
    if digits.len() <= keep {
        return (digits.iter().copied().collect(), false);
    }
    let mut work: DigitBuf = digits[..=keep].iter().copied().collect();
    // Fold everything below the guard digit into it: an exact-looking half
    // with nonzero digits further down is strictly above half.
    if work[keep] == 5 && !is_zero_values(&digits[keep + 1..]) {
        work[keep] = 6;
    }
    let rounded = round_values(&work, 10, true);
    let carry = rounded.len() > keep && !is_zero_values(&rounded);
    (rounded[..keep.min(rounded.len())].iter().copied().collect(), carry)
}

/// Signed value of the stored exponent field, when it fits a machine word.
fn stored_exponent(number: &Number) -> Option<i64> {
    let magnitude = Magnitude::from_bitfield(&number.exponent_field).to_u64()?;
    let value = i64::try_from(magnitude).ok()?;
    Some(if number.is_exponent_negative {
        -value
    } else {
        value
    })
}

/// Default significant digits for the general form, chosen so the shortest
/// faithful rendering of a parse survives a round trip.
fn default_general_precision(number: &Number) -> usize {
    if number.significand_precision <= 24 {
        8
    } else {
        17
    }
}

/// Minimum printed exponent digits for the scientific forms.
fn exponent_pad(number: &Number) -> usize {
    if number.significand_precision <= 24 {
        2
    } else {
        3
    }
}

// ============================================================================
// Layout Writers
// ============================================================================

fn write_fixed_point(out: &mut String, digits: &[u8], scale: i64, locale: &NumberLocale) {
    if scale <= 0 {
        out.push('0');
        out.push(locale.decimal_separator);
        for _ in 0..-scale {
            out.push('0');
        }
        out.push_str(&values_to_string(digits));
    } else if (scale as usize) < digits.len() {
        out.push_str(&values_to_string(&digits[..scale as usize]));
        out.push(locale.decimal_separator);
        out.push_str(&values_to_string(&digits[scale as usize..]));
    } else {
        out.push_str(&values_to_string(digits));
        for _ in 0..scale as usize - digits.len() {
            out.push('0');
        }
    }
}

fn write_exponent(out: &mut String, spec: &FormatSpec, total: i128, pad: usize) {
    out.push(if spec.uppercase_exponent { 'E' } else { 'e' });
    out.push(if total < 0 { '-' } else { '+' });
    let magnitude = total.unsigned_abs().to_string();
    for _ in magnitude.len()..pad {
        out.push('0');
    }
    out.push_str(&magnitude);
}

/// The general form keeps a stored exponent as literal text: marker, sign
/// only when negative, digits as stored without padding.
fn write_stored_suffix(out: &mut String, number: &Number, spec: &FormatSpec) {
    out.push(if spec.uppercase_exponent { 'E' } else { 'e' });
    if number.is_exponent_negative {
        out.push('-');
    }
    out.push_str(&values_to_string(&integer_digits(&number.exponent_field)));
}

// ============================================================================
// Format Kinds
// ============================================================================

fn render_zero(number: &Number, spec: &FormatSpec, locale: &NumberLocale) -> String {
    match spec.kind {
        FormatKind::General => "0".to_string(),
        FormatKind::Scientific => {
            let fraction = spec.precision.map_or(6, usize::from);
            let mut out = String::from("0");
            if fraction > 0 {
                out.push(locale.decimal_separator);
                for _ in 0..fraction {
                    out.push('0');
                }
            }
            write_exponent(&mut out, spec, 0, exponent_pad(number));
            out
        }
        FormatKind::Fixed => {
            let fraction = spec
                .precision
                .map_or(locale.fixed_digits as usize, usize::from);
            let mut out = String::from("0");
            if fraction > 0 {
                out.push(locale.decimal_separator);
                for _ in 0..fraction {
                    out.push('0');
                }
            }
            out
        }
    }
}

fn render_general(number: &Number, spec: &FormatSpec, locale: &NumberLocale) -> String {
    if let LiteralForm::Suffixed(radix) = number.literal_form {
        return render_suffixed(number, radix);
    }
    let parts = decompose(number);
    if parts.digits.is_empty() {
        return "0".to_string();
    }
    let precision = match spec.precision {
        Some(p) if p > 0 => p as usize,
        _ => default_general_precision(number),
    };
    let (mut digits, carry) = round_digits_to(&parts.digits, precision);
    let scale = parts.scale + i64::from(carry);
    while digits.last() == Some(&0) {
        digits.pop();
    }

    if -5 < scale && scale <= precision as i64 {
        let mut out = String::new();
        if number.is_significand_negative {
            out.push('-');
        }
        write_fixed_point(&mut out, &digits, scale, locale);
        if !number.exponent_field.is_zero() {
            write_stored_suffix(&mut out, number, spec);
        }
        return out;
    }

    match stored_exponent(number) {
        Some(stored) => {
            let total = scale as i128 - 1 + stored as i128;
            let mut out = String::new();
            if number.is_significand_negative {
                out.push('-');
            }
            out.push((b'0' + digits[0]) as char);
            if digits.len() > 1 {
                out.push(locale.decimal_separator);
                out.push_str(&values_to_string(&digits[1..]));
            }
            write_exponent(&mut out, spec, total, exponent_pad(number));
            out
        }
        // An exponent too wide to fold still renders as a literal suffix.
        None => {
            let mut out = String::new();
            if number.is_significand_negative {
                out.push('-');
            }
            write_fixed_point(&mut out, &digits, scale, locale);
            write_stored_suffix(&mut out, number, spec);
            out
        }
    }
}

fn render_scientific(number: &Number, spec: &FormatSpec, locale: &NumberLocale) -> String {
    let Some(stored) = stored_exponent(number) else {
        return render_general(number, spec, locale);
    };
    let fraction = spec.precision.map_or(6, usize::from);
    let parts = decompose(number);
    if parts.digits.is_empty() {
        return render_zero(number, spec, locale);
    }
    let keep = fraction + 1;
    let (mut digits, carry) = round_digits_to(&parts.digits, keep);
    while digits.len() < keep {
        digits.push(0);
    }
    let total = parts.scale as i128 + i128::from(carry) - 1 + stored as i128;

    let mut out = String::new();
    if number.is_significand_negative {
        out.push('-');
    }
    out.push((b'0' + digits[0]) as char);
    if fraction > 0 {
        out.push(locale.decimal_separator);
        out.push_str(&values_to_string(&digits[1..]));
    }
    write_exponent(&mut out, spec, total, exponent_pad(number));
    out
}

fn render_fixed(number: &Number, spec: &FormatSpec, locale: &NumberLocale) -> String {
    let Some(stored) = stored_exponent(number) else {
        return render_general(number, spec, locale);
    };
    let fraction = spec
        .precision
        .map_or(locale.fixed_digits as usize, usize::from);
    let parts = decompose(number);
    if parts.digits.is_empty() {
        return render_zero(number, spec, locale);
    }
    let folded_wide = parts.scale as i128 + stored as i128;
    if folded_wide.unsigned_abs() > FOLD_LIMIT as u128 {
        return render_general(number, spec, locale);
    }
    let mut folded = folded_wide as i64;

    let keep_budget = folded + fraction as i64;
    let (mut digits, carry) = if keep_budget < 0 {
        (DigitBuf::new(), false)
    } else {
        round_digits_to(&parts.digits, keep_budget as usize)
    };
    if carry {
        folded += 1;
        if digits.is_empty() {
            // The increment landed exactly on the last rendered place.
            digits.push(1);
        }
    }

    let all_zero = is_zero_values(&digits);
    let mut out = String::new();
    if number.is_significand_negative && !all_zero {
        out.push('-');
    }
    if folded <= 0 {
        out.push('0');
    } else {
        let int_len = (folded as usize).min(digits.len());
        out.push_str(&values_to_string(&digits[..int_len]));
        for _ in int_len..folded as usize {
            out.push('0');
        }
    }
    if fraction > 0 {
        out.push(locale.decimal_separator);
        let mut written = 0;
        for _ in 0..(-folded).max(0) {
            if written == fraction {
                break;
            }
            out.push('0');
            written += 1;
        }
        let fraction_digits = if folded <= 0 {
            &digits[..]
        } else {
            digits.get(folded as usize..).unwrap_or(&[])
        };
        for &d in fraction_digits {
            if written == fraction {
                break;
            }
            out.push((b'0' + d) as char);
            written += 1;
        }
        while written < fraction {
            out.push('0');
            written += 1;
        }
    }
    out
}

/// Suffixed literals render back in their own base: digits, colon, letter.
fn render_suffixed(number: &Number, radix: Radix) -> String {
    let mut out = String::new();
    if number.is_significand_negative {
        out.push('-');
    }
    let magnitude = Magnitude::from_bitfield(&number.integer_field);
    out.push_str(&values_to_string(&radix_digit_values(&magnitude, radix)));
    if let Some(letter) = radix.suffix_letter() {
        out.push(':');
        out.push(letter);
    }
    out
}

/// Digit values of a magnitude in a power-of-two base, grouped straight
/// from the bits; decimal goes through the doubling walk instead.
fn radix_digit_values(magnitude: &Magnitude, radix: Radix) -> DigitBuf {
    if magnitude.is_zero() {
        let mut values = DigitBuf::new();
        values.push(0);
        return values;
    }
    if radix == Radix::Decimal {
        return decimal_digits(magnitude);
    }
    let bits = radix.base().trailing_zeros() as usize;
    let count = (magnitude.bit_length() + bits - 1) / bits;
    let mut values = DigitBuf::with_capacity(count);
    for digit_index in (0..count).rev() {
        let mut value = 0u8;
        for offset in (0..bits).rev() {
            value = value << 1 | u8::from(magnitude.bit(digit_index * bits + offset));
        }
        values.push(value);
    }
    values
}
