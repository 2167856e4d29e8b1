// ============================================================================
// Arithmetic
// Exact magnitude arithmetic with a single rounding step per operation
// ============================================================================
//
// Every operation unpacks its operands into sign + exact magnitude, works at
// full width, and packs the result back under the supplied context. Packing
// is the only place precision is lost, so each operation rounds at most once.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Rem, Shl, Shr, Sub};

use crate::domain::config::{self, NumericContext, Rounding};
use crate::domain::number::{LiteralForm, Number, NumberKind};
use crate::numeric::magnitude::Magnitude;
use crate::numeric::BitField;

/// Cap on decimal exponents folded into a binary magnitude; beyond this the
/// intermediate would be unreasonably wide and the operation yields NaN.
const EXPONENT_FOLD_LIMIT: i64 = 1 << 20;

// ============================================================================
// Unpacked Form
// ============================================================================

/// A finite value taken apart for exact arithmetic:
/// `(-1)^negative * magnitude * 2^(-frac_bits) * 10^exponent`.
struct Unpacked {
    negative: bool,
    magnitude: Magnitude,
    frac_bits: usize,
    exponent: i64,
}

/// Take a finite number apart. Fails only when the stored exponent is too
/// wide for a machine word, in which case the operation answers NaN.
fn unpack(number: &Number) -> Option<Unpacked> {
    let frac_bits = number.fractional_field.aligned_len();
    let magnitude = Magnitude::from_bitfield(&number.integer_field)
        .shl(frac_bits)
        .add(&Magnitude::from_bitfield(&number.fractional_field));
    let exponent = i64::try_from(Magnitude::from_bitfield(&number.exponent_field).to_u64()?).ok()?;
    Some(Unpacked {
        negative: number.is_significand_negative,
        magnitude,
        frac_bits,
        exponent: if number.is_exponent_negative {
            -exponent
        } else {
            exponent
        },
    })
}

fn should_increment(rounding: Rounding, negative: bool, guard: bool, sticky: bool) -> bool {
    let dropped = guard || sticky;
    match rounding {
        // Exact halves (guard set, nothing below) go toward zero.
        Rounding::Nearest => guard && sticky,
        Rounding::TowardZero => false,
        Rounding::AwayFromZero => dropped,
        Rounding::TowardPositive => !negative && dropped,
        Rounding::TowardNegative => negative && dropped,
    }
}

/// Lay magnitude bits into a field under an optional bit budget. Once the
/// budget is full the window slides upward, dropping the lowest stored bit.
fn field_from_magnitude(magnitude: &Magnitude, budget: Option<u32>) -> (BitField, bool) {
    let mut field = BitField::new();
    let mut inexact = false;
    for index in 0..magnitude.bit_length() {
        let bit = magnitude.bit(index);
        match budget {
            Some(limit) if index >= limit as usize => {
                inexact |= field.get(0);
                field.decrease_precision();
                field.set(limit as usize - 1, bit);
            }
            _ => field.set(index, bit),
        }
    }
    (field, inexact)
}

/// Reassemble a number from sign + exact magnitude, rounding the fraction
/// to the context precision. `sticky` carries truncation the caller already
/// performed (a division remainder, for instance).
fn pack(
    negative: bool,
    mut magnitude: Magnitude,
    mut frac_bits: usize,
    mut exponent: i64,
    context: &NumericContext,
    mut sticky: bool,
) -> Number {
    // Positive decimal exponents fold exactly into the binary magnitude;
    // negative ones stay in the exponent field.
    if exponent > 0 {
        if exponent > EXPONENT_FOLD_LIMIT {
            return Number::special(NumberKind::NaN, context);
        }
        magnitude = magnitude.mul_pow10(exponent as u64);
        exponent = 0;
    }

    let precision = context.significand_bits as usize;
    if !context.unbounded && frac_bits > precision {
        let (kept, guard, below) = magnitude.shr_with_round_info(frac_bits - precision);
        sticky |= below;
        magnitude = kept;
        if should_increment(context.rounding, negative, guard, sticky) {
            magnitude = magnitude.add(&Magnitude::from_u64(1));
        }
        if guard || sticky {
            config::raise_inexact();
        }
        frac_bits = precision;
    } else if sticky {
        config::raise_inexact();
    }

    if magnitude.is_zero() {
        return Number::zero_with_sign(negative, context);
    }

    let significand_budget = (!context.unbounded).then_some(context.significand_bits);
    let exponent_budget = (!context.unbounded).then_some(context.exponent_bits);

    let (integer_field, integer_inexact) =
        field_from_magnitude(&magnitude.shr(frac_bits), significand_budget);

    let width = frac_bits.max(precision);
    let mut fractional_field = BitField::new();
    if width > 0 {
        fractional_field.set_zero(width - 1);
    }
    for offset in 0..frac_bits {
        fractional_field.set(width - frac_bits + offset, magnitude.bit(offset));
    }

    let exponent_negative = exponent < 0;
    let (exponent_field, exponent_inexact) = field_from_magnitude(
        &Magnitude::from_u64(exponent.unsigned_abs()),
        exponent_budget,
    );
    if integer_inexact || exponent_inexact {
        config::raise_inexact();
    }

    Number {
        kind: NumberKind::Finite,
        is_significand_negative: negative,
        is_exponent_negative: exponent_negative && !exponent_field.is_zero(),
        integer_field,
        fractional_field,
        exponent_field,
        significand_precision: context.significand_bits,
        exponent_precision: context.exponent_bits,
        rounding: context.rounding,
        literal_form: LiteralForm::Decimal,
    }
}

fn nan(context: &NumericContext) -> Number {
    Number::special(NumberKind::NaN, context)
}

fn infinity(negative: bool, context: &NumericContext) -> Number {
    let kind = if negative {
        NumberKind::NegativeInfinity
    } else {
        NumberKind::PositiveInfinity
    };
    Number::special(kind, context)
}

/// Bring two finite operands onto a shared grid: the smaller decimal
/// exponent and the wider fraction. Both adjustments are exact.
fn align(a: Unpacked, b: Unpacked) -> Option<(Unpacked, Unpacked)> {
    let exponent = a.exponent.min(b.exponent);
    let frac_bits = a.frac_bits.max(b.frac_bits);
    let rescale = |u: Unpacked| -> Option<Unpacked> {
        let decimal_steps = u.exponent - exponent;
        if decimal_steps > EXPONENT_FOLD_LIMIT {
            return None;
        }
        Some(Unpacked {
            negative: u.negative,
            magnitude: u
                .magnitude
                .mul_pow10(decimal_steps as u64)
                .shl(frac_bits - u.frac_bits),
            frac_bits,
            exponent,
        })
    };
    Some((rescale(a)?, rescale(b)?))
}

// ============================================================================
// Operations
// ============================================================================

impl Number {
    /// Addition under an explicit context.
    pub fn add_with(&self, other: &Number, context: &NumericContext) -> Number {
        use NumberKind::*;
        match (self.kind, other.kind) {
            (NaN, _) | (_, NaN) => nan(context),
            (PositiveInfinity, NegativeInfinity) | (NegativeInfinity, PositiveInfinity) => {
                nan(context)
            }
            (PositiveInfinity, _) | (_, PositiveInfinity) => infinity(false, context),
            (NegativeInfinity, _) | (_, NegativeInfinity) => infinity(true, context),
            // Adding a zero is exact: the other operand passes through
            // untouched instead of being renormalized onto a shared grid.
            (Zero, Zero) => {
                let negative = if self.is_significand_negative == other.is_significand_negative {
                    self.is_significand_negative
                } else {
                    context.rounding == Rounding::TowardNegative
                };
                Number::zero_with_sign(negative, context)
            }
            (Zero, _) => other.clone(),
            (_, Zero) => self.clone(),
            _ => {
                let (Some(a), Some(b)) = (unpack(self), unpack(other)) else {
                    return nan(context);
                };
                let Some((a, b)) = align(a, b) else {
                    return nan(context);
                };
                if a.negative == b.negative {
                    let sum = a.magnitude.add(&b.magnitude);
                    return pack(a.negative, sum, a.frac_bits, a.exponent, context, false);
                }
                match a.magnitude.cmp(&b.magnitude) {
                    std::cmp::Ordering::Greater => {
                        let difference = a.magnitude.sub(&b.magnitude);
                        pack(a.negative, difference, a.frac_bits, a.exponent, context, false)
                    }
                    std::cmp::Ordering::Less => {
                        let difference = b.magnitude.sub(&a.magnitude);
                        pack(b.negative, difference, a.frac_bits, a.exponent, context, false)
                    }
                    // Exact cancellation: positive zero everywhere except
                    // when rounding toward negative.
                    std::cmp::Ordering::Equal => Number::zero_with_sign(
                        context.rounding == Rounding::TowardNegative,
                        context,
                    ),
                }
            }
        }
    }

    /// Subtraction under an explicit context.
    pub fn sub_with(&self, other: &Number, context: &NumericContext) -> Number {
        self.add_with(&other.negate(), context)
    }

    /// Multiplication under an explicit context.
    pub fn mul_with(&self, other: &Number, context: &NumericContext) -> Number {
        use NumberKind::*;
        let sign = self.is_significand_negative != other.is_significand_negative;
        match (self.kind, other.kind) {
            (NaN, _) | (_, NaN) => nan(context),
            (PositiveInfinity | NegativeInfinity, Zero)
            | (Zero, PositiveInfinity | NegativeInfinity) => nan(context),
            (PositiveInfinity | NegativeInfinity, _)
            | (_, PositiveInfinity | NegativeInfinity) => infinity(sign, context),
            _ => {
                let (Some(a), Some(b)) = (unpack(self), unpack(other)) else {
                    return nan(context);
                };
                let Some(exponent) = a.exponent.checked_add(b.exponent) else {
                    return nan(context);
                };
                pack(
                    sign,
                    a.magnitude.mul(&b.magnitude),
                    a.frac_bits + b.frac_bits,
                    exponent,
                    context,
                    false,
                )
            }
        }
    }

    /// Division under an explicit context.
    ///
    /// A finite nonzero value over zero yields a signed infinity and sets
    /// the divide-by-zero flag; zero over zero yields NaN.
    pub fn div_with(&self, other: &Number, context: &NumericContext) -> Number {
        use NumberKind::*;
        let sign = self.is_significand_negative != other.is_significand_negative;
        match (self.kind, other.kind) {
            (NaN, _) | (_, NaN) => nan(context),
            (PositiveInfinity | NegativeInfinity, PositiveInfinity | NegativeInfinity) => {
                nan(context)
            }
            (Zero, Zero) => nan(context),
            (PositiveInfinity | NegativeInfinity, _) => infinity(sign, context),
            (_, PositiveInfinity | NegativeInfinity) => Number::zero_with_sign(sign, context),
            (Finite, Zero) => {
                config::raise_divide_by_zero();
                infinity(sign, context)
            }
            (Zero, _) => Number::zero_with_sign(sign, context),
            _ => {
                let (Some(a), Some(b)) = (unpack(self), unpack(other)) else {
                    return nan(context);
                };
                let Some(mut exponent) = a.exponent.checked_sub(b.exponent) else {
                    return nan(context);
                };
                let target_frac = context.significand_bits as usize + 2;

                let mut numerator = a.magnitude;
                let denominator = b.magnitude;
                let shift = target_frac as i64 + b.frac_bits as i64 - a.frac_bits as i64;
                let denominator = if shift >= 0 {
                    numerator = numerator.shl(shift as usize);
                    denominator
                } else {
                    denominator.shl(shift.unsigned_abs() as usize)
                };

                // A small numerator would starve the quotient of bits, so
                // borrow decimal magnitude from the exponent first. Ten is
                // worth at least three bits per step.
                let deficit = (denominator.bit_length() + target_frac)
                    .saturating_sub(numerator.bit_length());
                if deficit > 0 {
                    let steps = (deficit + 2) / 3;
                    if steps as i64 > EXPONENT_FOLD_LIMIT {
                        return nan(context);
                    }
                    numerator = numerator.mul_pow10(steps as u64);
                    let Some(lowered) = exponent.checked_sub(steps as i64) else {
                        return nan(context);
                    };
                    exponent = lowered;
                }

                let (quotient, remainder) = numerator.div_rem(&denominator);
                pack(
                    sign,
                    quotient,
                    target_frac,
                    exponent,
                    context,
                    !remainder.is_zero(),
                )
            }
        }
    }

    /// Truncated remainder under an explicit context; the result carries the
    /// dividend's sign and its magnitude is below the divisor's.
    pub fn rem_with(&self, other: &Number, context: &NumericContext) -> Number {
        use NumberKind::*;
        match (self.kind, other.kind) {
            (NaN, _) | (_, NaN) => nan(context),
            (PositiveInfinity | NegativeInfinity, _) | (_, Zero) => nan(context),
            (_, PositiveInfinity | NegativeInfinity) => self.clone(),
            (Zero, _) => Number::zero_with_sign(self.is_significand_negative, context),
            _ => {
                let (Some(a), Some(b)) = (unpack(self), unpack(other)) else {
                    return nan(context);
                };
                let Some((a, b)) = align(a, b) else {
                    return nan(context);
                };
                let (_, remainder) = a.magnitude.div_rem(&b.magnitude);
                pack(a.negative, remainder, a.frac_bits, a.exponent, context, false)
            }
        }
    }

    /// Scale by `2^count`.
    pub fn shift_left_with(&self, count: u32, context: &NumericContext) -> Number {
        match self.kind {
            NumberKind::NaN => nan(context),
            NumberKind::PositiveInfinity => infinity(false, context),
            NumberKind::NegativeInfinity => infinity(true, context),
            NumberKind::Zero => Number::zero_with_sign(self.is_significand_negative, context),
            NumberKind::Finite => {
                let Some(u) = unpack(self) else {
                    return nan(context);
                };
                pack(
                    u.negative,
                    u.magnitude.shl(count as usize),
                    u.frac_bits,
                    u.exponent,
                    context,
                    false,
                )
            }
        }
    }

    /// Scale by `2^-count`, rounding once at the context precision.
    pub fn shift_right_with(&self, count: u32, context: &NumericContext) -> Number {
        match self.kind {
            NumberKind::NaN => nan(context),
            NumberKind::PositiveInfinity => infinity(false, context),
            NumberKind::NegativeInfinity => infinity(true, context),
            NumberKind::Zero => Number::zero_with_sign(self.is_significand_negative, context),
            NumberKind::Finite => {
                let Some(u) = unpack(self) else {
                    return nan(context);
                };
                pack(
                    u.negative,
                    u.magnitude,
                    u.frac_bits + count as usize,
                    u.exponent,
                    context,
                    false,
                )
            }
        }
    }

    /// Bitwise AND over non-negative integral values; anything else is NaN.
    pub fn bit_and_with(&self, other: &Number, context: &NumericContext) -> Number {
        match (integral_magnitude(self), integral_magnitude(other)) {
            (Some(a), Some(b)) => pack(false, a.bit_and(&b), 0, 0, context, false),
            _ => nan(context),
        }
    }

    /// Bitwise OR over non-negative integral values; anything else is NaN.
    pub fn bit_or_with(&self, other: &Number, context: &NumericContext) -> Number {
        match (integral_magnitude(self), integral_magnitude(other)) {
            (Some(a), Some(b)) => pack(false, a.bit_or(&b), 0, 0, context, false),
            _ => nan(context),
        }
    }

    /// Bitwise XOR over non-negative integral values; anything else is NaN.
    pub fn bit_xor_with(&self, other: &Number, context: &NumericContext) -> Number {
        match (integral_magnitude(self), integral_magnitude(other)) {
            (Some(a), Some(b)) => pack(false, a.bit_xor(&b), 0, 0, context, false),
            _ => nan(context),
        }
    }

    /// Sign flip. NaN stays NaN; no context applies and no flag is raised.
    pub fn negate(&self) -> Number {
        let mut result = self.clone();
        match self.kind {
            NumberKind::NaN => {}
            NumberKind::PositiveInfinity => {
                result.kind = NumberKind::NegativeInfinity;
                result.is_significand_negative = true;
            }
            NumberKind::NegativeInfinity => {
                result.kind = NumberKind::PositiveInfinity;
                result.is_significand_negative = false;
            }
            NumberKind::Zero | NumberKind::Finite => {
                result.is_significand_negative = !self.is_significand_negative;
            }
        }
        result
    }

    /// Magnitude of the value; NaN stays NaN.
    pub fn abs(&self) -> Number {
        if self.is_significand_negative {
            self.negate()
        } else {
            self.clone()
        }
    }
}

/// The exact integer behind a non-negative integral value: the decimal
/// exponent folds in and every fraction bit must come out zero.
fn integral_magnitude(number: &Number) -> Option<Magnitude> {
    if !number.is_finite() || number.is_negative() {
        return None;
    }
    if number.is_zero() {
        return Some(Magnitude::zero());
    }
    let u = unpack(number)?;
    if u.exponent < 0 || u.exponent > EXPONENT_FOLD_LIMIT {
        return None;
    }
    let folded = u.magnitude.mul_pow10(u.exponent as u64);
    let (integral, guard, sticky) = folded.shr_with_round_info(u.frac_bits);
    if guard || sticky {
        return None;
    }
    Some(integral)
}

// ============================================================================
// Operator Sugar (thread context)
// ============================================================================

impl Add for Number {
    type Output = Number;
    fn add(self, rhs: Number) -> Number {
        self.add_with(&rhs, &config::thread_context())
    }
}

impl Add for &Number {
    type Output = Number;
    fn add(self, rhs: &Number) -> Number {
        self.add_with(rhs, &config::thread_context())
    }
}

impl Sub for Number {
    type Output = Number;
    fn sub(self, rhs: Number) -> Number {
        self.sub_with(&rhs, &config::thread_context())
    }
}

impl Sub for &Number {
    type Output = Number;
    fn sub(self, rhs: &Number) -> Number {
        self.sub_with(rhs, &config::thread_context())
    }
}

impl Mul for Number {
    type Output = Number;
    fn mul(self, rhs: Number) -> Number {
        self.mul_with(&rhs, &config::thread_context())
    }
}

impl Mul for &Number {
    type Output = Number;
    fn mul(self, rhs: &Number) -> Number {
        self.mul_with(rhs, &config::thread_context())
    }
}

impl Div for Number {
    type Output = Number;
    fn div(self, rhs: Number) -> Number {
        self.div_with(&rhs, &config::thread_context())
    }
}

impl Div for &Number {
    type Output = Number;
    fn div(self, rhs: &Number) -> Number {
        self.div_with(rhs, &config::thread_context())
    }
}

impl Rem for Number {
    type Output = Number;
    fn rem(self, rhs: Number) -> Number {
        self.rem_with(&rhs, &config::thread_context())
    }
}

impl Rem for &Number {
    type Output = Number;
    fn rem(self, rhs: &Number) -> Number {
        self.rem_with(rhs, &config::thread_context())
    }
}

impl Neg for Number {
    type Output = Number;
    fn neg(self) -> Number {
        self.negate()
    }
}

impl Neg for &Number {
    type Output = Number;
    fn neg(self) -> Number {
        self.negate()
    }
}

impl Shl<u32> for Number {
    type Output = Number;
    fn shl(self, count: u32) -> Number {
        self.shift_left_with(count, &config::thread_context())
    }
}

impl Shr<u32> for Number {
    type Output = Number;
    fn shr(self, count: u32) -> Number {
        self.shift_right_with(count, &config::thread_context())
    }
}

impl BitAnd for Number {
    type Output = Number;
    fn bitand(self, rhs: Number) -> Number {
        self.bit_and_with(&rhs, &config::thread_context())
    }
}

impl BitAnd for &Number {
    type Output = Number;
    fn bitand(self, rhs: &Number) -> Number {
        self.bit_and_with(rhs, &config::thread_context())
    }
}

impl BitOr for Number {
    type Output = Number;
    fn bitor(self, rhs: Number) -> Number {
        self.bit_or_with(&rhs, &config::thread_context())
    }
}

impl BitXor for Number {
    type Output = Number;
    fn bitxor(self, rhs: Number) -> Number {
        self.bit_xor_with(&rhs, &config::thread_context())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::config::{self, NumericContext, Rounding};
    use crate::domain::locale::NumberLocale;
    use crate::domain::number::Number;

    fn n(text: &str) -> Number {
        Number::parse(text).unwrap()
    }

    fn n8(text: &str) -> Number {
        Number::parse_with(
            text,
            &NumberLocale::invariant(),
            &NumericContext::new(8, 11),
        )
        .unwrap()
    }

    #[test]
    fn test_add_basics() {
        assert_eq!(n("2") + n("3"), n("5"));
        assert_eq!(n("1.5") + n("2.25"), n("3.75"));
        assert_eq!(n("1") + n("-2"), n("-1"));
        assert_eq!(n("-1.5") + n("-1.5"), n("-3"));
        assert_eq!(n("1e2") + n("0"), n("1e2"));
    }

    #[test]
    fn test_add_aligns_decimal_exponents() {
        // The sum lands on the smaller exponent grid; a positive grid
        // exponent then folds into the significand.
        assert_eq!(n("1e2") + n("5e1"), n("150"));
        assert_eq!(n("2.5e-1") + n("2.5e-1"), n("5e-1"));
    }

    #[test]
    fn test_exact_cancellation_is_positive_zero() {
        let sum = n("1.5") + n("-1.5");
        assert!(sum.is_zero());
        assert!(!sum.is_negative());

        let context = NumericContext::double_precision().with_rounding(Rounding::TowardNegative);
        let sum = n("1.5").add_with(&n("-1.5"), &context);
        assert!(sum.is_zero());
        assert!(sum.is_negative());
    }

    #[test]
    fn test_sub_basics() {
        assert_eq!(n("5") - n("3"), n("2"));
        assert_eq!(n("3") - n("5"), n("-2"));
        assert_eq!(n("2.5") - n("0.25"), n("2.25"));
    }

    #[test]
    fn test_mul_basics() {
        assert_eq!(n("1.5") * n("2"), n("3"));
        assert_eq!(n("-4") * n("2.5"), n("-10"));
        assert_eq!(n("-4") * n("-0.5"), n("2"));
        // Positive exponents fold into the significand, negative ones stay.
        assert_eq!(n("1e3") * n("2e-1"), n("200"));
        assert_eq!(n("2e-1") * n("3e-1"), n("6e-2"));
        let product = n("0") * n("-5");
        assert!(product.is_zero());
        assert!(product.is_negative());
    }

    #[test]
    fn test_div_exact() {
        assert_eq!(n("3") / n("2"), n("1.5"));
        assert_eq!(n("10") / n("4"), n("2.5"));
        assert_eq!(n("-10") / n("4"), n("-2.5"));
        assert_eq!(n("0") / n("7"), Number::zero());
    }

    #[test]
    fn test_div_borrows_decimal_exponent() {
        // A numerator far below the denominator keeps its precision by
        // moving scale into the exponent field.
        assert_eq!(n("1") / n("4"), n("2.5e-1"));
    }

    #[test]
    fn test_div_rounds_once_at_precision() {
        let context = NumericContext::new(8, 11);
        let third = n8("1").div_with(&n8("3"), &context);
        // 2^10 / 3 pre-scaled by ten: 853/2560, truncated under Nearest.
        assert_eq!(third, n8("3.33203125e-1"));

        let away = NumericContext::new(8, 11).with_rounding(Rounding::AwayFromZero);
        let third = n8("1").div_with(&n8("3"), &away);
        assert_eq!(third, n8("3.3359375e-1"));

        let floor = NumericContext::new(8, 11).with_rounding(Rounding::TowardNegative);
        let third = n8("-1").div_with(&n8("3"), &floor);
        assert_eq!(third, n8("-3.3359375e-1"));
    }

    #[test]
    fn test_nearest_ties_go_toward_zero() {
        let context = NumericContext::new(8, 11);
        // 5/256 halved leaves an exact half ulp: 2.5/256 keeps 2/256.
        let tie = n8("0.01953125").shift_right_with(1, &context);
        assert_eq!(tie, n8("0.0078125"));

        let away = NumericContext::new(8, 11).with_rounding(Rounding::AwayFromZero);
        let tie = n8("0.01953125").shift_right_with(1, &away);
        assert_eq!(tie, n8("0.01171875"));
    }

    #[test]
    fn test_rem_basics() {
        assert_eq!(n("7") % n("2"), n("1"));
        assert_eq!(n("-7") % n("2"), n("-1"));
        assert_eq!(n("7") % n("-2"), n("1"));
        assert_eq!(n("7.5") % n("2"), n("1.5"));
        assert_eq!(n("6") % n("2"), Number::zero());
    }

    #[test]
    fn test_rem_specials() {
        assert!((Number::positive_infinity() % n("2")).is_nan());
        assert!((n("7") % Number::zero()).is_nan());
        assert_eq!(n("7") % Number::positive_infinity(), n("7"));
        let zero = n("-0.0") % n("3");
        assert!(zero.is_zero());
        assert!(zero.is_negative());
    }

    #[test]
    fn test_shifts() {
        assert_eq!(n("3") << 2, n("12"));
        assert_eq!(n("12") >> 2, n("3"));
        assert_eq!(n("-1.5") << 1, n("-3"));
        assert_eq!(n("1") >> 1, n("0.5"));
    }

    #[test]
    fn test_bitwise_on_integral_values() {
        assert_eq!(n("6") & n("3"), n("2"));
        assert_eq!(n("6") | n("3"), n("7"));
        assert_eq!(n("6") ^ n("3"), n("5"));
        // The decimal exponent folds in before the integral check.
        assert_eq!(n("0.5e1") & n("3"), n("1"));
        assert_eq!(n("0x1F") & n("0xF0"), n("0x10"));
    }

    #[test]
    fn test_bitwise_rejects_non_integral() {
        assert!((n("0.5") & n("1")).is_nan());
        assert!((n("-2") | n("1")).is_nan());
        assert!((n("3") ^ n("1e-1")).is_nan());
        assert!((Number::positive_infinity() & n("1")).is_nan());
    }

    #[test]
    fn test_negate_and_abs() {
        assert_eq!(-n("3"), n("-3"));
        assert_eq!(n("-3").abs(), n("3"));
        assert_eq!(n("3").abs(), n("3"));
        assert!(Number::nan().negate().is_nan());
        assert!((-Number::positive_infinity()).is_negative_infinity());
        assert!(Number::negative_infinity().abs().is_positive_infinity());
        let minus_zero = -Number::zero();
        assert!(minus_zero.is_zero());
        assert!(minus_zero.is_negative());
    }

    #[test]
    fn test_infinity_tables() {
        let inf = Number::positive_infinity();
        let neg_inf = Number::negative_infinity();
        assert!((inf.clone() + neg_inf.clone()).is_nan());
        assert_eq!(inf.clone() + n("1"), inf);
        assert_eq!(neg_inf.clone() - n("1e9"), neg_inf);
        assert!((inf.clone() * Number::zero()).is_nan());
        assert_eq!(inf.clone() * n("-2"), neg_inf);
        assert!((inf.clone() / neg_inf.clone()).is_nan());
        assert_eq!(n("1") / inf, Number::zero());
    }

    #[test]
    fn test_nan_propagates() {
        assert!((Number::nan() + n("1")).is_nan());
        assert!((n("1") - Number::nan()).is_nan());
        assert!((Number::nan() * Number::nan()).is_nan());
        assert!((n("1") % Number::nan()).is_nan());
        assert!(Number::nan().abs().is_nan());
    }

    #[test]
    fn test_divide_by_zero_flag() {
        std::thread::spawn(|| {
            config::clear_flags();
            let quotient = n("1") / Number::zero();
            assert!(quotient.is_positive_infinity());
            assert!(config::flags().divide_by_zero);

            config::clear_flags();
            let quotient = n("-1") / Number::zero();
            assert!(quotient.is_negative_infinity());
            assert!(config::flags().divide_by_zero);

            // 0/0 is invalid, not a zero division.
            config::clear_flags();
            assert!((Number::zero() / Number::zero()).is_nan());
            assert!(!config::flags().divide_by_zero);
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_inexact_flag_on_rounded_division() {
        std::thread::spawn(|| {
            config::clear_flags();
            let _ = n("3") / n("2");
            assert!(!config::flags().inexact);

            let _ = n("1") / n("3");
            assert!(config::flags().inexact);
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_unbounded_context_widens_fractions() {
        let context = NumericContext::double_precision().with_unbounded(true);
        let locale = NumberLocale::invariant();
        let a = Number::parse_with("0.5", &locale, &context).unwrap();
        let b = Number::parse_with("0.25", &locale, &context).unwrap();
        let product = a.mul_with(&b, &context);
        // 53-bit operand fractions multiply to a 106-bit fraction, all kept.
        assert_eq!(product.fractional_field().significant_bits(), 106);
        assert_eq!(product, Number::parse_with("0.125", &locale, &context).unwrap());
    }

    #[test]
    fn test_results_render_under_result_context() {
        let context = NumericContext::single_precision();
        let sum = n("1").add_with(&n("2"), &context);
        assert_eq!(sum.significand_precision(), 24);
        assert_eq!(sum.fractional_field().significant_bits(), 24);
    }
}
