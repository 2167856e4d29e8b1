// ============================================================================
// Numeric Module
// Digit-string and bit-field primitives underneath the literal engine
// ============================================================================
//
// This module provides:
// - Radix: the four supported positional bases and their digit alphabets
// - digits: base-aware halving, doubling and rounding on digit strings
// - BitField: a growable bit vector that remembers dropped precision
// - Magnitude (crate-internal): exact word arithmetic for Number operations
//
// Design principles:
// - No floating-point operations anywhere in a conversion
// - All fallible arithmetic returns Result (no panics)
// - Digit strings stay strings; binary state stays in bit fields

mod bitfield;
pub mod digits;
mod errors;
pub(crate) mod magnitude;
mod radix;

pub use bitfield::BitField;
pub use errors::{NumericError, NumericResult};
pub use radix::Radix;
