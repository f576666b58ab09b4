//! Terminal output for conversions and weekly runs.

pub mod format;

pub use format::*;
