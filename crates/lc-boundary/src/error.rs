use thiserror::Error;

use crate::boundary::PointId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundaryError {
    #[error(transparent)]
    Field(#[from] lc_core::Error),
    #[error("target field requested but the level set has none")]
    MissingTarget,
    #[error("boundary point {point} belongs to {segments} segments (non-manifold contour)")]
    NonManifoldPoint { point: PointId, segments: usize },
    #[error("interior boundary point {point} ends an open contour")]
    OpenContour { point: PointId },
    #[error("boundary has not been discretised")]
    NotDiscretised,
    #[error("boundary point {point} out of range (boundary has {len} points)")]
    UnknownPoint { point: PointId, len: usize },
}
