use lc_core::{Grid, LevelSetField, validate_values};
use rustc_hash::FxHashMap;

use crate::boundary::{Boundary, BoundaryPoint, BoundarySegment, BoundaryState, PointId, PointOrigin};
use crate::error::BoundaryError;
use crate::status::{MeshStatus, NodeStatus, classify};
use crate::topology::link;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryConfig {
    /// Nodes with `|value| <= zero_tolerance` lie on the contour.
    pub zero_tolerance: f64,
    /// Interpolation denominators below this place the point mid-edge.
    pub min_denominator: f64,
    /// Sensitivity slots allocated per point.
    pub num_sensitivities: usize,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: 1e-12,
            min_denominator: 1e-14,
            num_sensitivities: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    #[default]
    Primary,
    Target,
}

impl Boundary {
    /// Rebuilds the boundary from the zero contour of `field` on `grid`.
    ///
    /// On error the boundary is left [`BoundaryState::Invalid`] and must not
    /// be used for optimisation.
    pub fn discretise<G, F>(
        &mut self,
        grid: &G,
        field: &F,
        kind: FieldKind,
    ) -> Result<(), BoundaryError>
    where
        G: Grid,
        F: LevelSetField + ?Sized,
    {
        self.reset();
        self.field = kind;

        match self.discretise_inner(grid, field) {
            Ok(()) => {
                self.state = BoundaryState::Discretised;
                log::debug!(
                    "discretised {} points, {} segments over {} cut elements, length {:.6}",
                    self.points.len(),
                    self.segments.len(),
                    self.status.num_cut_elements(),
                    self.length
                );
                Ok(())
            }
            Err(err) => {
                self.state = BoundaryState::Invalid;
                log::warn!("boundary discretisation failed: {err}");
                Err(err)
            }
        }
    }

    fn discretise_inner<G, F>(&mut self, grid: &G, field: &F) -> Result<(), BoundaryError>
    where
        G: Grid,
        F: LevelSetField + ?Sized,
    {
        let values = select_values(field, self.field)?;
        validate_values(values, grid.num_nodes())?;

        self.status = classify(grid, values, self.config.zero_tolerance);

        let sweep = Sweep::new(grid, values, &self.status, &self.config);
        let (points, segments) = sweep.run();
        self.points = points;
        self.segments = segments;
        self.length = self.segments.iter().map(|s| s.length).sum();

        link(&mut self.points, &self.segments)?;
        self.compute_point_lengths();

        Ok(())
    }
}

pub(crate) fn select_values<F>(field: &F, kind: FieldKind) -> Result<&[f64], BoundaryError>
where
    F: LevelSetField + ?Sized,
{
    match kind {
        FieldKind::Primary => Ok(field.signed_distance()),
        FieldKind::Target => field.target().ok_or(BoundaryError::MissingTarget),
    }
}

/// Fraction of the way from `va` to `vb` at which the linear interpolant
/// vanishes.
#[inline]
pub(crate) fn zero_crossing(va: f64, vb: f64, min_denominator: f64) -> f64 {
    let denom = vb - va;
    if denom.abs() < min_denominator {
        0.5
    } else {
        (-va / denom).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Crossing {
    point: PointId,
    /// Walking the element counter-clockwise, the edge goes from outside to
    /// inside.
    entering: bool,
}

/// One sweep over the cut elements. Owns the edge/node to point map, so
/// every shared grid edge yields a single point.
struct Sweep<'a, G> {
    grid: &'a G,
    values: &'a [f64],
    status: &'a MeshStatus,
    cfg: &'a BoundaryConfig,
    point_at: FxHashMap<PointOrigin, PointId>,
    points: Vec<BoundaryPoint>,
    segments: Vec<BoundarySegment>,
}

impl<'a, G: Grid> Sweep<'a, G> {
    fn new(
        grid: &'a G,
        values: &'a [f64],
        status: &'a MeshStatus,
        cfg: &'a BoundaryConfig,
    ) -> Self {
        Self {
            grid,
            values,
            status,
            cfg,
            point_at: FxHashMap::default(),
            points: Vec::new(),
            segments: Vec::new(),
        }
    }

    fn run(mut self) -> (Vec<BoundaryPoint>, Vec<BoundarySegment>) {
        let status = self.status;
        for element in status.iter_cut_elements() {
            self.visit_element(element);
        }
        (self.points, self.segments)
    }

    fn visit_element(&mut self, element: usize) {
        let nodes = self.grid.element_nodes(element);

        for &n in &nodes {
            if self.status.node(n) == NodeStatus::OnContour {
                self.node_point(n);
            }
        }

        let mut crossings: [Option<Crossing>; 4] = [None; 4];
        let mut count = 0;
        for k in 0..4 {
            let a = nodes[k];
            let b = nodes[(k + 1) % 4];
            let (ia, ib) = (self.status.is_inside(a), self.status.is_inside(b));
            if ia == ib {
                continue;
            }

            crossings[k] = Some(Crossing {
                point: self.edge_point(a, b),
                entering: ib,
            });
            count += 1;
        }

        match count {
            2 => {
                let mut it = crossings.iter().flatten().copied();
                if let (Some(c0), Some(c1)) = (it.next(), it.next()) {
                    self.join(c0, c1, element);
                }
            }
            4 => self.resolve_saddle(element, &nodes, &crossings),
            // A closed cycle of four nodes changes sign an even number of
            // times, so anything else means no crossing at all.
            _ => {}
        }
    }

    /// Four crossings: decide the pairing from the element-centre value.
    fn resolve_saddle(&mut self, element: usize, nodes: &[usize; 4], crossings: &[Option<Crossing>; 4]) {
        let centre = nodes.iter().map(|&n| self.values[n]).sum::<f64>() / 4.0;
        let centre_inside = centre < -self.cfg.zero_tolerance;
        let first_inside = self.status.is_inside(nodes[0]);

        // Corners whose side differs from the centre are cut off.
        let cut: [usize; 2] = if first_inside != centre_inside {
            [0, 2]
        } else {
            [1, 3]
        };

        log::trace!(
            "saddle element {element}: centre value {centre:.3e}, cutting corners {cut:?}"
        );

        for corner in cut {
            let before = crossings[(corner + 3) % 4];
            let after = crossings[corner];
            if let (Some(c0), Some(c1)) = (before, after) {
                self.join(c0, c1, element);
            }
        }
    }

    /// Adds the segment between two crossings, leaving material on its left.
    fn join(&mut self, c0: Crossing, c1: Crossing, element: usize) {
        let (start, end) = if c0.entering {
            (c1.point, c0.point)
        } else {
            (c0.point, c1.point)
        };

        if start == end {
            log::trace!("dropping degenerate segment at point {start} in element {element}");
            return;
        }

        let length = self.points[start].coord.distance(self.points[end].coord);
        self.segments.push(BoundarySegment {
            start,
            end,
            element,
            length,
            weight: 1.0,
        });
    }

    fn node_point(&mut self, node: usize) -> PointId {
        let key = PointOrigin::Node(node);
        if let Some(&id) = self.point_at.get(&key) {
            return id;
        }

        let point = BoundaryPoint::new(
            self.grid.node_coord(node),
            key,
            self.grid.is_domain_node(node),
            self.grid.is_fixed_node(node),
            self.cfg.num_sensitivities,
        );
        self.push_point(key, point)
    }

    /// Point on the cut edge `a`-`b`; exactly one endpoint is inside.
    fn edge_point(&mut self, a: usize, b: usize) -> PointId {
        if self.status.node(a) == NodeStatus::OnContour {
            return self.node_point(a);
        }
        if self.status.node(b) == NodeStatus::OnContour {
            return self.node_point(b);
        }

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let key = PointOrigin::Edge(lo, hi);
        if let Some(&id) = self.point_at.get(&key) {
            return id;
        }

        let t = zero_crossing(self.values[lo], self.values[hi], self.cfg.min_denominator);
        let coord = self.grid.node_coord(lo).lerp(self.grid.node_coord(hi), t);

        let point = BoundaryPoint::new(
            coord,
            key,
            self.grid.is_domain_edge(lo, hi),
            self.grid.is_fixed_node(lo) && self.grid.is_fixed_node(hi),
            self.cfg.num_sensitivities,
        );
        self.push_point(key, point)
    }

    fn push_point(&mut self, key: PointOrigin, point: BoundaryPoint) -> PointId {
        let id = self.points.len();
        self.points.push(point);
        self.point_at.insert(key, id);
        id
    }
}
