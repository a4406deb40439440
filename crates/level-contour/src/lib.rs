//! Umbrella crate for the `level-contour` workspace.
//!
//! Re-exports the grid/field primitives and the boundary discretisation so
//! callers can depend on a single crate.

pub use lc_boundary::*;
pub use lc_core::*;
