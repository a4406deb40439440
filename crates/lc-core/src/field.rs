use crate::{Error, Grid, Point2};

/// Source of per-node signed-distance values.
///
/// Values are negative inside material, positive outside and zero on the
/// contour. The optional target field is used for shape-matching problems.
pub trait LevelSetField {
    fn signed_distance(&self) -> &[f64];

    fn target(&self) -> Option<&[f64]> {
        None
    }
}

/// Owned signed-distance field with an optional target.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelSet {
    signed_distance: Vec<f64>,
    target: Option<Vec<f64>>,
}

impl LevelSet {
    pub fn from_vec<G: Grid>(grid: &G, values: Vec<f64>) -> Result<Self, Error> {
        check_len(&values, grid.num_nodes())?;
        Ok(Self {
            signed_distance: values,
            target: None,
        })
    }

    pub fn from_fn<G: Grid>(grid: &G, f: impl Fn(Point2) -> f64) -> Self {
        Self {
            signed_distance: sample_nodes(grid, f),
            target: None,
        }
    }

    /// Signed distance to a circle: negative inside the disc.
    pub fn circle<G: Grid>(grid: &G, centre: Point2, radius: f64) -> Self {
        Self::from_fn(grid, |p| p.distance(centre) - radius)
    }

    pub fn with_target(mut self, target: Vec<f64>) -> Result<Self, Error> {
        check_len(&target, self.signed_distance.len())?;
        self.target = Some(target);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.signed_distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signed_distance.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.signed_distance
    }
}

impl LevelSetField for LevelSet {
    fn signed_distance(&self) -> &[f64] {
        &self.signed_distance
    }

    fn target(&self) -> Option<&[f64]> {
        self.target.as_deref()
    }
}

/// Checks that `values` holds exactly `expected` finite entries.
pub fn validate_values(values: &[f64], expected: usize) -> Result<(), Error> {
    check_len(values, expected)?;
    match values.iter().position(|v| !v.is_finite()) {
        Some(node) => Err(Error::NonFiniteValue {
            node,
            value: values[node],
        }),
        None => Ok(()),
    }
}

fn check_len(values: &[f64], expected: usize) -> Result<(), Error> {
    if values.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

fn sample_nodes<G: Grid>(grid: &G, f: impl Fn(Point2) -> f64) -> Vec<f64> {
    (0..grid.num_nodes())
        .map(|n| f(grid.node_coord(n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{LevelSet, LevelSetField, validate_values};
    use crate::{Error, Grid, Point2, StructuredGrid};

    #[test]
    fn from_vec_checks_node_count() {
        let g = StructuredGrid::new(2, 2).expect("valid grid");

        let err = LevelSet::from_vec(&g, vec![0.0; 8]).unwrap_err();
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 9,
                actual: 8
            }
        );

        let ls = LevelSet::from_vec(&g, vec![1.0; 9]).expect("matching length");
        assert_eq!(ls.len(), 9);
        assert!(ls.target().is_none());
    }

    #[test]
    fn circle_is_negative_inside() {
        let g = StructuredGrid::new(4, 4).expect("valid grid");
        let ls = LevelSet::circle(&g, Point2::new(2.0, 2.0), 1.5);

        assert!((ls.values()[g.node_index(2, 2)] + 1.5).abs() < 1e-12);
        assert!((ls.values()[g.node_index(0, 2)] - 0.5).abs() < 1e-12);
        assert_eq!(ls.signed_distance().len(), g.num_nodes());
    }

    #[test]
    fn target_must_match_primary() {
        let g = StructuredGrid::new(1, 1).expect("valid grid");
        let ls = LevelSet::from_vec(&g, vec![1.0, -1.0, 1.0, 1.0]).expect("valid field");

        assert!(ls.clone().with_target(vec![0.0; 3]).is_err());

        let with_target = ls.with_target(vec![-1.0; 4]).expect("matching target");
        assert_eq!(with_target.target(), Some(&[-1.0; 4][..]));
    }

    #[test]
    fn validate_rejects_non_finite() {
        assert!(validate_values(&[0.0, 1.0], 2).is_ok());
        assert!(matches!(
            validate_values(&[0.0, f64::NAN], 2),
            Err(Error::NonFiniteValue { node: 1, .. })
        ));
        assert!(matches!(
            validate_values(&[f64::INFINITY], 2),
            Err(Error::SizeMismatch { expected: 2, actual: 1 })
        ));
    }
}
