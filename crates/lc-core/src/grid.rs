use crate::{Error, Point2, Vec2};

/// Read-only view of a fixed grid of rectangular elements.
///
/// Elements are axis-aligned rectangles. `element_nodes` lists the four
/// corner nodes counter-clockwise starting at the lower-left corner, so
/// edge `k` of an element joins corner `k` to corner `(k + 1) % 4`.
pub trait Grid {
    fn num_nodes(&self) -> usize;

    fn num_elements(&self) -> usize;

    fn node_coord(&self, node: usize) -> Point2;

    fn element_nodes(&self, element: usize) -> [usize; 4];

    /// Elements sharing `node`, at most four.
    fn node_elements(&self, node: usize) -> [Option<usize>; 4];

    fn is_domain_node(&self, node: usize) -> bool;

    /// Whether the grid edge `a`-`b` lies on the outer domain boundary.
    fn is_domain_edge(&self, a: usize, b: usize) -> bool;

    fn is_fixed_node(&self, node: usize) -> bool;

    /// Outward unit normal of the domain side through `node`.
    ///
    /// `None` for interior nodes and for corners, where no single side
    /// applies.
    fn domain_normal(&self, node: usize) -> Option<Vec2>;

    /// Outward unit normal of the domain side holding edge `a`-`b`.
    fn domain_edge_normal(&self, a: usize, b: usize) -> Option<Vec2>;
}

/// Uniform rectangular grid of `nelx * nely` square elements.
///
/// Nodes are numbered row-major, `j * (nelx + 1) + i`; elements
/// `j * nelx + i`. `j` grows with `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredGrid {
    nelx: usize,
    nely: usize,
    spacing: f64,
    origin: Point2,
    fixed: Vec<bool>,
}

impl StructuredGrid {
    pub fn new(nelx: usize, nely: usize) -> Result<Self, Error> {
        Self::with_spacing(nelx, nely, 1.0)
    }

    pub fn with_spacing(nelx: usize, nely: usize, spacing: f64) -> Result<Self, Error> {
        if nelx == 0 || nely == 0 {
            return Err(Error::InvalidDimensions { nelx, nely });
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(Error::InvalidSpacing(spacing));
        }

        let num_nodes = (nelx + 1)
            .checked_mul(nely + 1)
            .ok_or(Error::InvalidDimensions { nelx, nely })?;

        Ok(Self {
            nelx,
            nely,
            spacing,
            origin: Point2::default(),
            fixed: vec![false; num_nodes],
        })
    }

    pub fn with_origin(mut self, origin: Point2) -> Self {
        self.origin = origin;
        self
    }

    pub fn nelx(&self) -> usize {
        self.nelx
    }

    pub fn nely(&self) -> usize {
        self.nely
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn origin(&self) -> Point2 {
        self.origin
    }

    pub fn width(&self) -> f64 {
        self.nelx as f64 * self.spacing
    }

    pub fn height(&self) -> f64 {
        self.nely as f64 * self.spacing
    }

    pub fn node_index(&self, i: usize, j: usize) -> usize {
        j * (self.nelx + 1) + i
    }

    pub fn element_index(&self, i: usize, j: usize) -> usize {
        j * self.nelx + i
    }

    pub fn node_ij(&self, node: usize) -> (usize, usize) {
        (node % (self.nelx + 1), node / (self.nelx + 1))
    }

    pub fn fix_node(&mut self, node: usize) -> Result<(), Error> {
        let len = self.fixed.len();
        let slot = self
            .fixed
            .get_mut(node)
            .ok_or(Error::NodeOutOfRange { node, len })?;
        *slot = true;
        Ok(())
    }

    /// Marks every node whose coordinate satisfies `pred` as fixed and
    /// returns how many were newly fixed.
    pub fn fix_nodes_where(&mut self, pred: impl Fn(Point2) -> bool) -> usize {
        let mut count = 0;
        for node in 0..self.fixed.len() {
            if !self.fixed[node] && pred(self.node_coord(node)) {
                self.fixed[node] = true;
                count += 1;
            }
        }
        count
    }

    /// Outward normals of every domain side touching the node.
    fn side_normals(&self, node: usize) -> [Option<Vec2>; 2] {
        let (i, j) = self.node_ij(node);
        let sx = if i == 0 {
            Some(Vec2::new(-1.0, 0.0))
        } else if i == self.nelx {
            Some(Vec2::new(1.0, 0.0))
        } else {
            None
        };
        let sy = if j == 0 {
            Some(Vec2::new(0.0, -1.0))
        } else if j == self.nely {
            Some(Vec2::new(0.0, 1.0))
        } else {
            None
        };
        [sx, sy]
    }
}

impl Grid for StructuredGrid {
    fn num_nodes(&self) -> usize {
        self.fixed.len()
    }

    fn num_elements(&self) -> usize {
        self.nelx * self.nely
    }

    fn node_coord(&self, node: usize) -> Point2 {
        let (i, j) = self.node_ij(node);
        self.origin + Vec2::new(i as f64 * self.spacing, j as f64 * self.spacing)
    }

    fn element_nodes(&self, element: usize) -> [usize; 4] {
        let i = element % self.nelx;
        let j = element / self.nelx;
        [
            self.node_index(i, j),
            self.node_index(i + 1, j),
            self.node_index(i + 1, j + 1),
            self.node_index(i, j + 1),
        ]
    }

    fn node_elements(&self, node: usize) -> [Option<usize>; 4] {
        let (i, j) = self.node_ij(node);
        let at = |di: isize, dj: isize| {
            let ei = i as isize + di;
            let ej = j as isize + dj;
            if ei < 0 || ej < 0 || ei as usize >= self.nelx || ej as usize >= self.nely {
                None
            } else {
                Some(self.element_index(ei as usize, ej as usize))
            }
        };
        [at(-1, -1), at(0, -1), at(0, 0), at(-1, 0)]
    }

    fn is_domain_node(&self, node: usize) -> bool {
        let (i, j) = self.node_ij(node);
        i == 0 || j == 0 || i == self.nelx || j == self.nely
    }

    fn is_domain_edge(&self, a: usize, b: usize) -> bool {
        self.domain_edge_normal(a, b).is_some()
    }

    fn is_fixed_node(&self, node: usize) -> bool {
        self.fixed.get(node).copied().unwrap_or(false)
    }

    fn domain_normal(&self, node: usize) -> Option<Vec2> {
        match self.side_normals(node) {
            [Some(n), None] | [None, Some(n)] => Some(n),
            _ => None,
        }
    }

    fn domain_edge_normal(&self, a: usize, b: usize) -> Option<Vec2> {
        let na = self.side_normals(a);
        let nb = self.side_normals(b);
        na.into_iter()
            .flatten()
            .find(|n| nb.iter().flatten().any(|m| m == n))
    }
}
