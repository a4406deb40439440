use crate::boundary::{Boundary, BoundaryPoint, BoundarySegment, Contour, PointId, SegmentId};
use crate::error::BoundaryError;

/// Fills every point's `segments`/`neighbours` from one pass over the
/// segments, then checks the contour is a 1-manifold.
pub(crate) fn link(
    points: &mut [BoundaryPoint],
    segments: &[BoundarySegment],
) -> Result<(), BoundaryError> {
    for p in points.iter_mut() {
        p.segments.clear();
        p.neighbours.clear();
    }

    for (id, s) in segments.iter().enumerate() {
        points[s.start].segments.push(id);
        points[s.start].neighbours.push(s.end);
        points[s.end].segments.push(id);
        points[s.end].neighbours.push(s.start);
    }

    for (id, p) in points.iter().enumerate() {
        match p.segments.len() {
            0 | 2 => {}
            1 if p.is_domain => {}
            1 => return Err(BoundaryError::OpenContour { point: id }),
            n => {
                return Err(BoundaryError::NonManifoldPoint {
                    point: id,
                    segments: n,
                });
            }
        }
    }

    Ok(())
}

impl Boundary {
    /// Splits the linked points into chains.
    ///
    /// Open chains (ending on the domain boundary) come first, each starting
    /// at a single-neighbour point. Closed loops follow and are walked in
    /// segment direction, so material stays on their left. Isolated points
    /// are not reported.
    pub fn contours(&self) -> Vec<Contour> {
        let mut visited = vec![false; self.points.len()];
        let mut out = Vec::new();

        for start in 0..self.points.len() {
            if !visited[start] && self.points[start].n_segments() == 1 {
                out.push(self.trace_chain(start, &mut visited));
            }
        }

        for start in 0..self.points.len() {
            if !visited[start] && self.points[start].n_segments() == 2 {
                out.push(self.trace_chain(start, &mut visited));
            }
        }

        out
    }

    fn trace_chain(&self, start: PointId, visited: &mut [bool]) -> Contour {
        let mut points = vec![start];
        let mut length = 0.0;
        let mut closed = false;
        visited[start] = true;

        let mut cur = start;
        let mut prev_seg: Option<SegmentId> = None;

        let max_steps = self.segments.len().max(1);
        for _ in 0..max_steps {
            let Some(seg) = self.next_segment(cur, prev_seg) else {
                break;
            };

            let s = &self.segments[seg];
            let next = s.other(cur);
            length += s.length;

            if next == start {
                closed = true;
                break;
            }
            if visited[next] {
                break;
            }

            visited[next] = true;
            points.push(next);
            prev_seg = Some(seg);
            cur = next;
        }

        Contour {
            points,
            closed,
            length,
        }
    }

    /// Segment leaving `cur` other than the one we arrived by, preferring one
    /// that starts at `cur`.
    fn next_segment(&self, cur: PointId, prev_seg: Option<SegmentId>) -> Option<SegmentId> {
        let mut fallback = None;
        for &seg in &self.points[cur].segments {
            if Some(seg) == prev_seg {
                continue;
            }
            if self.segments[seg].start == cur {
                return Some(seg);
            }
            if fallback.is_none() {
                fallback = Some(seg);
            }
        }
        fallback
    }
}
