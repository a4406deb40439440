use lc_core::{Point2, Vec2};

use crate::discretise::{BoundaryConfig, FieldKind};
use crate::error::BoundaryError;
use crate::status::MeshStatus;

pub type PointId = usize;
pub type SegmentId = usize;

/// Grid location a boundary point was placed on. Doubles as the
/// deduplication key during discretisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointOrigin {
    /// A node whose field value is zero.
    Node(usize),
    /// A crossing on the grid edge between two nodes, lower index first.
    Edge(usize, usize),
}

/// One vertex of the discretised contour.
///
/// `velocity`, the movement limits and `sensitivities` belong to the
/// optimiser; they are allocated here and otherwise left untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryPoint {
    pub coord: Point2,
    /// Inward unit normal, zero until normals are computed.
    pub normal: Vec2,
    /// Integration length used as a quadrature weight.
    pub length: f64,
    /// Normal velocity, positive inwards.
    pub velocity: f64,
    pub negative_limit: f64,
    pub positive_limit: f64,
    pub is_domain: bool,
    pub is_fixed: bool,
    pub origin: PointOrigin,
    pub segments: Vec<SegmentId>,
    pub neighbours: Vec<PointId>,
    pub sensitivities: Vec<f64>,
}

impl BoundaryPoint {
    pub(crate) fn new(
        coord: Point2,
        origin: PointOrigin,
        is_domain: bool,
        is_fixed: bool,
        num_sensitivities: usize,
    ) -> Self {
        Self {
            coord,
            normal: Vec2::default(),
            length: 0.0,
            velocity: 0.0,
            negative_limit: 0.0,
            positive_limit: 0.0,
            is_domain,
            is_fixed,
            origin,
            segments: Vec::with_capacity(2),
            neighbours: Vec::with_capacity(2),
            sensitivities: vec![0.0; num_sensitivities],
        }
    }

    pub fn n_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn n_neighbours(&self) -> usize {
        self.neighbours.len()
    }
}

/// One edge of the discretised contour, inside a single grid element.
///
/// Material lies to the left when walking from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundarySegment {
    pub start: PointId,
    pub end: PointId,
    pub element: usize,
    pub length: f64,
    pub weight: f64,
}

impl BoundarySegment {
    /// The endpoint opposite `point`.
    pub fn other(&self, point: PointId) -> PointId {
        if self.start == point {
            self.end
        } else {
            self.start
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryState {
    #[default]
    Empty,
    Discretised,
    /// The last discretisation failed; points and segments are partial.
    Invalid,
}

/// A chain of linked boundary points.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<PointId>,
    pub closed: bool,
    pub length: f64,
}

/// Discretised zero contour of one field snapshot.
///
/// Points and segments cross-reference each other by index only and are
/// rebuilt from scratch by every call to [`Boundary::discretise`].
#[derive(Debug, Clone, Default)]
pub struct Boundary {
    pub points: Vec<BoundaryPoint>,
    pub segments: Vec<BoundarySegment>,
    /// Sum of all segment lengths.
    pub length: f64,
    /// Classification produced by the last discretisation.
    pub status: MeshStatus,
    pub(crate) config: BoundaryConfig,
    pub(crate) state: BoundaryState,
    pub(crate) field: FieldKind,
}

impl Boundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BoundaryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    pub fn state(&self) -> BoundaryState {
        self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state == BoundaryState::Discretised
    }

    /// Field the boundary was last discretised from.
    pub fn field_kind(&self) -> FieldKind {
        self.field
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    pub fn n_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn iter_domain_points(&self) -> impl Iterator<Item = (PointId, &BoundaryPoint)> {
        self.points.iter().enumerate().filter(|(_, p)| p.is_domain)
    }

    pub(crate) fn ensure_discretised(&self) -> Result<(), BoundaryError> {
        if self.state == BoundaryState::Discretised {
            Ok(())
        } else {
            Err(BoundaryError::NotDiscretised)
        }
    }

    pub(crate) fn reset(&mut self) {
        self.points.clear();
        self.segments.clear();
        self.length = 0.0;
        self.status = MeshStatus::default();
        self.state = BoundaryState::Empty;
    }
}
