//! Foundational primitives for level-set contour discretisation.
//!
//! ## Grids
//! A [`Grid`] is a read-only provider of node coordinates, element
//! connectivity and boundary flags. Elements are axis-aligned rectangles
//! whose corner nodes are listed counter-clockwise from the lower-left
//! corner. [`StructuredGrid`] is the uniform implementation used by the
//! optimiser.
//!
//! ## Fields
//! A [`LevelSetField`] supplies one signed-distance value per grid node:
//! negative inside material, positive outside, zero on the contour. Values
//! are validated against the grid before use with [`validate_values`].
//!
//! ## Coordinates
//! All geometry is `f64`. `y` grows with the row index `j`, so the
//! counter-clockwise element ordering keeps material to the left of a
//! contour walked in the discretiser's segment direction.

mod error;
mod field;
mod geom;
mod grid;

pub use error::Error;
pub use field::{LevelSet, LevelSetField, validate_values};
pub use geom::{Point2, Vec2};
pub use grid::{Grid, StructuredGrid};
