//! Input/output helpers.
//!
//! - fixed project directory layout and file naming (`layout`)
//! - JSON → JavaScript artifact conversion (`artifact`)
//! - batch conversion of the weekly JSON folder (`batch`)

pub mod artifact;
pub mod batch;
pub mod layout;

pub use artifact::*;
pub use batch::*;
pub use layout::*;
