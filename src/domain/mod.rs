//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the weekly reporting period (`Period`) and the week-of-month rule

pub mod period;

pub use period::*;
