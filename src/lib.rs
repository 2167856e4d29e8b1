// ============================================================================
// Numeral Engine Library
// Arbitrary-precision parsing, arithmetic and rendering of numeric literals
// ============================================================================

//! # Numeral Engine
//!
//! A literal engine that reads numbers in four competing grammars, stores
//! them exactly in precision-bounded bit fields and renders them back
//! without ever touching floating point.
//!
//! ## Features
//!
//! - **Four literal grammars** (special values, reals, radix prefixes and
//!   radix suffixes) competing by longest match
//! - **Precision-bounded bit fields** with explicit truncation tracking
//!   instead of hardware floats
//! - **Thread-local numeric contexts** carrying precision, rounding mode
//!   and sticky status flags
//! - **Printf-style rendering** (general, scientific and fixed forms) under
//!   pluggable locales
//!
//! ## Example
//!
//! ```rust
//! use numeral_engine::prelude::*;
//!
//! // The same value in three grammars.
//! let plain = Number::parse("31").unwrap();
//! let prefixed = Number::parse("0x1F").unwrap();
//! let suffixed = Number::parse("1F:H").unwrap();
//! assert_eq!(plain, prefixed);
//! assert_eq!(prefixed, suffixed);
//!
//! // Arithmetic rounds once per operation under the thread context.
//! let sum = &plain + &Number::parse("0.25").unwrap();
//! assert_eq!(sum.to_string(), "31.25");
//!
//! // Rendering remembers the literal form and follows format strings.
//! assert_eq!(suffixed.to_string(), "1F:H");
//! assert_eq!(plain.format("e2").unwrap(), "3.10e+001");
//! ```

pub mod domain;
pub mod engine;
pub mod format;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        clear_flags, flags, set_thread_context, thread_context, Flags, LiteralForm, Number,
        NumberKind, NumberLocale, NumericContext, ParseNumberError, Rounding, ScanReport,
    };
    pub use crate::engine::{LiteralKind, Partition, PartitionSelector, Selection};
    pub use crate::format::{FormatKind, FormatSpec};
    pub use crate::numeric::Radix;
}
