// ============================================================================
// Format Module
// Format-string parsing and text rendering for numbers
// ============================================================================
//
// This module provides:
// - FormatSpec: the parsed `[GgEeFf][digits]` format string
// - render: bit fields back to text under a spec and locale
//
// The general form is the shortest faithful one and backs `Display`; the
// explicit scientific and fixed forms reproduce printf-style layouts.

pub mod render;
pub mod spec;

pub use render::render;
pub use spec::{FormatError, FormatKind, FormatResult, FormatSpec};
