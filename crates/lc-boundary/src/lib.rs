//! Explicit boundary extraction from a level-set zero contour.
//!
//! This crate turns one snapshot of a signed-distance field on a fixed grid
//! into a piecewise-linear boundary and the geometry an optimiser needs to
//! move it:
//! - [`classify`] labels nodes inside/outside/on-contour and elements cut or
//!   uncut. The result is a side output ([`MeshStatus`]); the grid is never
//!   written to.
//! - [`Boundary::discretise`] sweeps the cut elements, places one point per
//!   cut grid edge (or per zero-valued node) and one segment per contour
//!   crossing of an element, then links points to their segments and
//!   neighbours.
//! - [`Boundary::compute_normal_vectors`], [`Boundary::compute_perimeter`]
//!   and the per-point integration lengths describe the result.
//!
//! Conventions:
//! - Nodes with `|value| <= zero_tolerance` lie on the contour and count as
//!   outside when deciding which edges are cut; a crossing next to such a
//!   node is that node's point.
//! - Segments leave material on their left. Saddle elements are resolved by
//!   the mean of their four node values.
//! - A boundary is single-owner state: every discretisation rebuilds it, and
//!   a failed one leaves it [`BoundaryState::Invalid`].

mod analysis;
mod boundary;
mod discretise;
mod error;
mod status;
mod topology;

pub use analysis::{area_fractions, element_gradient};
pub use boundary::{
    Boundary, BoundaryPoint, BoundarySegment, BoundaryState, Contour, PointId, PointOrigin,
    SegmentId,
};
pub use discretise::{BoundaryConfig, FieldKind};
pub use error::BoundaryError;
pub use status::{ElementStatus, MeshStatus, NodeStatus, classify, node_status};
