// ============================================================================
// Numeric Context Configuration
// Precision, rounding and status-flag state for conversions and arithmetic
// ============================================================================

use std::cell::Cell;

use crate::numeric::{NumericError, NumericResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Rounding Mode
// ============================================================================

/// Defines how a result that does not fit the precision budget is rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rounding {
    /// Round to the nearest representable value; exact halves round toward
    /// zero so that the kept digits never grow on a tie
    Nearest,

    /// Truncate toward zero regardless of sign
    TowardZero,

    /// Round toward positive infinity (ceiling)
    TowardPositive,

    /// Round toward negative infinity (floor)
    TowardNegative,

    /// Round away from zero whenever anything was dropped
    AwayFromZero,
}

// ============================================================================
// Status Flags
// ============================================================================

/// Sticky per-thread status flags raised by conversions and arithmetic.
///
/// Flags accumulate until [`clear_flags`] is called, so a batch of
/// operations can be checked once at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flags {
    /// A finite value was divided by zero
    pub divide_by_zero: bool,

    /// A result lost digits to the precision budget
    pub inexact: bool,
}

impl Flags {
    /// True when no flag has been raised
    pub fn is_clear(&self) -> bool {
        !self.divide_by_zero && !self.inexact
    }
}

// ============================================================================
// Numeric Context
// ============================================================================

/// Precision and rounding parameters for parsing, arithmetic and rendering.
///
/// A context is plain data: it can be passed explicitly to the `*_with`
/// arithmetic operations, or installed per thread with
/// [`set_thread_context`] for the operator impls to pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericContext {
    /// Bit budget for each significand field (integer and fraction)
    pub significand_bits: u32,

    /// Bit budget for the decimal exponent field
    pub exponent_bits: u32,

    /// Rounding applied when a result exceeds the significand budget
    pub rounding: Rounding,

    /// When set, the integer and exponent fields grow without limit;
    /// the fraction field still stops at `significand_bits`
    pub unbounded: bool,
}

impl NumericContext {
    /// Create a context with explicit precision budgets and default
    /// nearest rounding
    pub fn new(significand_bits: u32, exponent_bits: u32) -> Self {
        Self {
            significand_bits,
            exponent_bits,
            rounding: Rounding::Nearest,
            unbounded: false,
        }
    }

    /// Builder method: set the significand bit budget
    pub fn with_significand_bits(mut self, bits: u32) -> Self {
        self.significand_bits = bits;
        self
    }

    /// Builder method: set the exponent bit budget
    pub fn with_exponent_bits(mut self, bits: u32) -> Self {
        self.exponent_bits = bits;
        self
    }

    /// Builder method: set the rounding mode
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Builder method: let integer and exponent fields grow without limit
    pub fn with_unbounded(mut self, unbounded: bool) -> Self {
        self.unbounded = unbounded;
        self
    }

    /// Validate the context parameters
    pub fn validate(&self) -> NumericResult<()> {
        if self.significand_bits == 0 || self.exponent_bits == 0 {
            return Err(NumericError::InvalidPrecision);
        }
        Ok(())
    }
}

impl Default for NumericContext {
    fn default() -> Self {
        Self::double_precision()
    }
}

// ============================================================================
// Preset Contexts (Factory Methods)
// ============================================================================

impl NumericContext {
    /// IEEE 754 binary32 shaped context
    /// - 24 significand bits, 8 exponent bits
    pub fn single_precision() -> Self {
        Self::new(24, 8)
    }

    /// IEEE 754 binary64 shaped context (the thread default)
    /// - 53 significand bits, 11 exponent bits
    pub fn double_precision() -> Self {
        Self::new(53, 11)
    }

    /// IEEE 754 binary128 shaped context
    /// - 113 significand bits, 15 exponent bits
    pub fn quad_precision() -> Self {
        Self::new(113, 15)
    }
}

// ============================================================================
// Per-Thread Ambient State
// ============================================================================

thread_local! {
    static AMBIENT_CONTEXT: Cell<Option<NumericContext>> = const { Cell::new(None) };
    static AMBIENT_FLAGS: Cell<Flags> = const {
        Cell::new(Flags {
            divide_by_zero: false,
            inexact: false,
        })
    };
}

/// Current thread's context, installing the double-precision default on
/// first use.
pub fn thread_context() -> NumericContext {
    AMBIENT_CONTEXT.with(|cell| match cell.get() {
        Some(context) => context,
        None => {
            let context = NumericContext::default();
            cell.set(Some(context));
            context
        }
    })
}

/// Replace the current thread's context.
///
/// # Errors
///
/// Returns [`NumericError::InvalidPrecision`] when either bit budget is
/// zero; the installed context is left unchanged in that case.
pub fn set_thread_context(context: NumericContext) -> NumericResult<()> {
    context.validate()?;
    tracing::debug!(
        significand_bits = context.significand_bits,
        exponent_bits = context.exponent_bits,
        "thread numeric context replaced"
    );
    AMBIENT_CONTEXT.with(|cell| cell.set(Some(context)));
    Ok(())
}

/// Current thread's accumulated status flags.
pub fn flags() -> Flags {
    AMBIENT_FLAGS.with(Cell::get)
}

/// Reset the current thread's status flags.
pub fn clear_flags() {
    AMBIENT_FLAGS.with(|cell| cell.set(Flags::default()));
}

pub(crate) fn raise_divide_by_zero() {
    AMBIENT_FLAGS.with(|cell| {
        let mut flags = cell.get();
        if !flags.divide_by_zero {
            tracing::debug!("divide-by-zero flag raised");
        }
        flags.divide_by_zero = true;
        cell.set(flags);
    });
}

pub(crate) fn raise_inexact() {
    AMBIENT_FLAGS.with(|cell| {
        let mut flags = cell.get();
        if !flags.inexact {
            tracing::debug!("inexact flag raised");
        }
        flags.inexact = true;
        cell.set(flags);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let context = NumericContext::new(24, 8);
        assert_eq!(context.significand_bits, 24);
        assert_eq!(context.exponent_bits, 8);
        assert_eq!(context.rounding, Rounding::Nearest);
        assert!(!context.unbounded);
        assert!(context.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let context = NumericContext::double_precision()
            .with_rounding(Rounding::TowardZero)
            .with_unbounded(true);

        assert_eq!(context.significand_bits, 53);
        assert_eq!(context.rounding, Rounding::TowardZero);
        assert!(context.unbounded);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            NumericContext::new(0, 11).validate(),
            Err(NumericError::InvalidPrecision)
        );
        assert_eq!(
            NumericContext::new(53, 0).validate(),
            Err(NumericError::InvalidPrecision)
        );
    }

    #[test]
    fn test_preset_contexts() {
        assert_eq!(NumericContext::single_precision().significand_bits, 24);
        assert_eq!(NumericContext::double_precision().exponent_bits, 11);
        assert_eq!(NumericContext::quad_precision().significand_bits, 113);
        assert_eq!(NumericContext::default(), NumericContext::double_precision());
    }

    #[test]
    fn test_thread_default_installed_on_first_read() {
        std::thread::spawn(|| {
            assert_eq!(thread_context(), NumericContext::double_precision());
            assert!(flags().is_clear());
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_thread_isolation() {
        std::thread::spawn(|| {
            set_thread_context(NumericContext::single_precision()).unwrap();
            raise_inexact();
            assert_eq!(thread_context().significand_bits, 24);
            assert!(flags().inexact);
        })
        .join()
        .unwrap();

        // A fresh thread starts from the defaults again.
        std::thread::spawn(|| {
            assert_eq!(thread_context().significand_bits, 53);
            assert!(flags().is_clear());
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_invalid_context_rejected() {
        std::thread::spawn(|| {
            set_thread_context(NumericContext::quad_precision()).unwrap();
            let result = set_thread_context(NumericContext::new(0, 0));
            assert!(result.is_err());
            assert_eq!(thread_context(), NumericContext::quad_precision());
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_flags_accumulate_until_cleared() {
        std::thread::spawn(|| {
            raise_divide_by_zero();
            raise_inexact();
            let flags = flags();
            assert!(flags.divide_by_zero);
            assert!(flags.inexact);
            clear_flags();
            assert!(super::flags().is_clear());
        })
        .join()
        .unwrap();
    }
}
