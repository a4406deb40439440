use lc_core::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeStatus {
    Inside,
    Outside,
    OnContour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementStatus {
    Inside,
    Outside,
    /// Mixed signs, or at least one node on the contour.
    Cut,
}

/// Per-node and per-element classification of one field snapshot.
///
/// Produced by [`classify`] and kept on the boundary as a side output; the
/// grid itself is never written to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshStatus {
    pub nodes: Vec<NodeStatus>,
    pub elements: Vec<ElementStatus>,
}

impl MeshStatus {
    pub fn node(&self, node: usize) -> NodeStatus {
        self.nodes[node]
    }

    pub fn element(&self, element: usize) -> ElementStatus {
        self.elements[element]
    }

    /// Inside for topology purposes: on-contour nodes count as outside.
    #[inline]
    pub fn is_inside(&self, node: usize) -> bool {
        self.nodes[node] == NodeStatus::Inside
    }

    pub fn iter_cut_elements(&self) -> impl Iterator<Item = usize> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == ElementStatus::Cut)
            .map(|(e, _)| e)
    }

    pub fn num_cut_elements(&self) -> usize {
        self.iter_cut_elements().count()
    }

    pub fn num_on_contour_nodes(&self) -> usize {
        self.nodes
            .iter()
            .filter(|s| **s == NodeStatus::OnContour)
            .count()
    }
}

#[inline]
pub fn node_status(value: f64, zero_tolerance: f64) -> NodeStatus {
    if value < -zero_tolerance {
        NodeStatus::Inside
    } else if value > zero_tolerance {
        NodeStatus::Outside
    } else {
        NodeStatus::OnContour
    }
}

/// Classifies every node and element of `grid` against `values`.
///
/// `values` must already hold one entry per node.
pub fn classify<G: Grid>(grid: &G, values: &[f64], zero_tolerance: f64) -> MeshStatus {
    let nodes: Vec<NodeStatus> = values
        .iter()
        .map(|&v| node_status(v, zero_tolerance))
        .collect();

    let elements = (0..grid.num_elements())
        .map(|e| {
            let mut inside = 0;
            let mut outside = 0;
            for n in grid.element_nodes(e) {
                match nodes[n] {
                    NodeStatus::Inside => inside += 1,
                    NodeStatus::Outside => outside += 1,
                    NodeStatus::OnContour => return ElementStatus::Cut,
                }
            }
            match (inside, outside) {
                (0, _) => ElementStatus::Outside,
                (_, 0) => ElementStatus::Inside,
                _ => ElementStatus::Cut,
            }
        })
        .collect();

    MeshStatus { nodes, elements }
}
