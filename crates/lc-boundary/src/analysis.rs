//! Normals, integration lengths and material area fractions.

use lc_core::{Grid, LevelSetField, Point2, Vec2, validate_values};

use crate::boundary::{Boundary, PointId, PointOrigin};
use crate::discretise::{select_values, zero_crossing};
use crate::error::BoundaryError;
use crate::status::{NodeStatus, node_status};

impl Boundary {
    /// Computes the inward unit normal of every boundary point from the
    /// field gradient.
    ///
    /// The gradient is the bilinear gradient of each element the point's
    /// segments lie in, summed. Points where it vanishes fall back to the
    /// left-hand normals of their segments. Points on a domain side have the
    /// component along the outward domain normal removed.
    pub fn compute_normal_vectors<G, F>(&mut self, grid: &G, field: &F) -> Result<(), BoundaryError>
    where
        G: Grid,
        F: LevelSetField + ?Sized,
    {
        self.ensure_discretised()?;
        let values = select_values(field, self.field)?;
        validate_values(values, grid.num_nodes())?;

        for id in 0..self.points.len() {
            let normal = self.point_normal(grid, values, id);
            self.points[id].normal = normal;
        }

        Ok(())
    }

    /// Half the length of each segment `point` belongs to, summed.
    ///
    /// Summed over all points this reproduces [`Boundary::length`].
    pub fn compute_perimeter(&self, point: PointId) -> Result<f64, BoundaryError> {
        self.ensure_discretised()?;
        let p = self
            .points
            .get(point)
            .ok_or(BoundaryError::UnknownPoint {
                point,
                len: self.points.len(),
            })?;

        Ok(p.segments.iter().map(|&s| 0.5 * self.segments[s].length).sum())
    }

    /// Material area fraction of every grid element, in `[0, 1]`.
    pub fn compute_area_fractions<G, F>(&self, grid: &G, field: &F) -> Result<Vec<f64>, BoundaryError>
    where
        G: Grid,
        F: LevelSetField + ?Sized,
    {
        self.ensure_discretised()?;
        let values = select_values(field, self.field)?;
        validate_values(values, grid.num_nodes())?;

        Ok(area_fractions(
            grid,
            values,
            self.config.zero_tolerance,
            self.config.min_denominator,
        ))
    }

    pub(crate) fn compute_point_lengths(&mut self) {
        for i in 0..self.points.len() {
            let length: f64 = self.points[i]
                .segments
                .iter()
                .map(|&s| 0.5 * self.segments[s].weight * self.segments[s].length)
                .sum();
            self.points[i].length = length;
        }
    }

    fn point_normal<G: Grid>(&self, grid: &G, values: &[f64], id: PointId) -> Vec2 {
        let point = &self.points[id];

        let mut grad = Vec2::default();
        if point.segments.is_empty() {
            if let PointOrigin::Node(n) = point.origin {
                for e in grid.node_elements(n).into_iter().flatten() {
                    grad += element_gradient(grid, values, e, point.coord);
                }
            }
        } else {
            for &s in &point.segments {
                grad += element_gradient(grid, values, self.segments[s].element, point.coord);
            }
        }

        let mut normal = (-grad).normalize();
        if normal == Vec2::default() {
            let mut sum = Vec2::default();
            for &s in &point.segments {
                let seg = &self.segments[s];
                sum += (self.points[seg.end].coord - self.points[seg.start].coord)
                    .normalize()
                    .perp();
            }
            normal = sum.normalize();
        }

        if point.is_domain
            && let Some(outward) = domain_normal(grid, point.origin)
        {
            let slid = (normal - outward * normal.dot(outward)).normalize();
            if slid != Vec2::default() {
                normal = slid;
            }
        }

        normal
    }
}

fn domain_normal<G: Grid>(grid: &G, origin: PointOrigin) -> Option<Vec2> {
    match origin {
        PointOrigin::Node(n) => grid.domain_normal(n),
        PointOrigin::Edge(a, b) => grid.domain_edge_normal(a, b),
    }
}

/// Gradient of the bilinear interpolant of `values` over `element`,
/// evaluated at `p` (clamped into the element).
pub fn element_gradient<G: Grid>(grid: &G, values: &[f64], element: usize, p: Point2) -> Vec2 {
    let [n0, n1, n2, n3] = grid.element_nodes(element);
    let lo = grid.node_coord(n0);
    let hi = grid.node_coord(n2);
    let hx = hi.x - lo.x;
    let hy = hi.y - lo.y;
    if hx <= 0.0 || hy <= 0.0 {
        return Vec2::default();
    }

    let xi = ((p.x - lo.x) / hx).clamp(0.0, 1.0);
    let eta = ((p.y - lo.y) / hy).clamp(0.0, 1.0);
    let (f0, f1, f2, f3) = (values[n0], values[n1], values[n2], values[n3]);

    Vec2::new(
        ((1.0 - eta) * (f1 - f0) + eta * (f2 - f3)) / hx,
        ((1.0 - xi) * (f3 - f0) + xi * (f2 - f1)) / hy,
    )
}

/// Material area fraction of every element, using the same piecewise-linear
/// contour the discretiser builds.
///
/// Saddle elements follow the element-centre rule, so the summed material
/// area equals the area enclosed by the discretised boundary.
pub fn area_fractions<G: Grid>(
    grid: &G,
    values: &[f64],
    zero_tolerance: f64,
    min_denominator: f64,
) -> Vec<f64> {
    (0..grid.num_elements())
        .map(|e| {
            let nodes = grid.element_nodes(e);
            let coords = nodes.map(|n| grid.node_coord(n));
            let total = polygon_area(&coords);
            if total <= 0.0 {
                return 0.0;
            }

            let f = nodes.map(|n| values[n]);
            let status = f.map(|v| node_status(v, zero_tolerance));
            let material = material_area(
                &nodes,
                &coords,
                &f,
                &status,
                zero_tolerance,
                min_denominator,
            );
            (material / total).clamp(0.0, 1.0)
        })
        .collect()
}

fn material_area(
    nodes: &[usize; 4],
    coords: &[Point2; 4],
    f: &[f64; 4],
    status: &[NodeStatus; 4],
    zero_tolerance: f64,
    min_denominator: f64,
) -> f64 {
    let inside = status.map(|s| s == NodeStatus::Inside);

    // Same placement as the discretiser: snap to on-contour nodes, otherwise
    // interpolate from the lower-indexed node.
    let crossing = |k: usize| {
        let (a, b) = (k, (k + 1) % 4);
        if status[a] == NodeStatus::OnContour {
            return coords[a];
        }
        if status[b] == NodeStatus::OnContour {
            return coords[b];
        }
        let (lo, hi) = if nodes[a] < nodes[b] { (a, b) } else { (b, a) };
        let t = zero_crossing(f[lo], f[hi], min_denominator);
        coords[lo].lerp(coords[hi], t)
    };

    let n_inside = inside.iter().filter(|&&i| i).count();
    if n_inside == 0 {
        return 0.0;
    }

    let is_saddle = inside[0] == inside[2] && inside[1] == inside[3] && inside[0] != inside[1];
    if is_saddle {
        let centre = f.iter().sum::<f64>() / 4.0;
        let centre_inside = centre < -zero_tolerance;
        if !centre_inside {
            // Two separate corner triangles.
            return (0..4)
                .filter(|&k| inside[k])
                .map(|k| polygon_area(&[crossing((k + 3) % 4), coords[k], crossing(k)]))
                .sum();
        }
    }

    let mut poly = [Point2::default(); 8];
    let mut len = 0;
    for k in 0..4 {
        if inside[k] {
            poly[len] = coords[k];
            len += 1;
        }
        if inside[k] != inside[(k + 1) % 4] {
            poly[len] = crossing(k);
            len += 1;
        }
    }

    polygon_area(&poly[..len])
}

/// Unsigned shoelace area.
fn polygon_area(poly: &[Point2]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }

    let mut twice = 0.0;
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    0.5 * twice.abs()
}
