// ============================================================================
// Domain Module
// Numbers, numeric contexts and locales
// ============================================================================

pub mod arithmetic;
pub mod config;
pub mod locale;
pub mod number;

pub use config::{
    clear_flags, flags, set_thread_context, thread_context, Flags, NumericContext, Rounding,
};
pub use locale::NumberLocale;
pub use number::{LiteralForm, Number, NumberKind, ParseNumberError, ScanReport};
