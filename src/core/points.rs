//! Point-set primitives shared by the evaluators and the schedule search.
//!
//! Point sets are plain `DMatrix<f64>` values with one point per row
//! (n×D, D = 2 or 3). Row order is semantically significant only insofar
//! as waypoint indices reference positions within a set.

use nalgebra::{DMatrix, DVector};

use crate::error::{RegError, Result};

/// Full pairwise squared-Euclidean distance matrix.
///
/// Rows of `a` and `b` are points; entry `(i, j)` is `||a_i - b_j||²`.
pub fn sq_dist_matrix(a: &DMatrix<f64>, b: &DMatrix<f64>) -> DMatrix<f64> {
    debug_assert_eq!(a.ncols(), b.ncols(), "point dimensions must agree");
    let mut dist = DMatrix::zeros(a.nrows(), b.nrows());
    for i in 0..a.nrows() {
        for j in 0..b.nrows() {
            let mut acc = 0.0;
            for d in 0..a.ncols() {
                let diff = a[(i, d)] - b[(j, d)];
                acc += diff * diff;
            }
            dist[(i, j)] = acc;
        }
    }
    dist
}

/// Euclidean norm of every row.
pub fn row_norms(m: &DMatrix<f64>) -> DVector<f64> {
    DVector::from_iterator(m.nrows(), m.row_iter().map(|r| r.norm()))
}

/// Scale every row to unit length.
///
/// Zero rows are left untouched rather than divided to NaN.
pub fn normalize_rows(m: &DMatrix<f64>) -> DMatrix<f64> {
    let mut out = m.clone();
    for mut row in out.row_iter_mut() {
        let norm = row.norm();
        if norm > 0.0 {
            for v in row.iter_mut() {
                *v /= norm;
            }
        }
    }
    out
}

/// An oriented point set: parallel direction and site matrices.
///
/// `directions` and `sites` are r×D with row i of `directions` attached at
/// row i of `sites`. Directions from a data source are not guaranteed unit
/// length; formulas that compare orientation normalize them first. After
/// warping, direction magnitude encodes a meaningful per-row scale ("beta").
#[derive(Clone, Debug)]
pub struct OrientedSet {
    /// Direction vectors, one per row.
    pub directions: DMatrix<f64>,
    /// Base sites the directions are attached at, one per row.
    pub sites: DMatrix<f64>,
}

impl OrientedSet {
    /// Pair directions with their base sites, checking that the shapes agree.
    pub fn new(directions: DMatrix<f64>, sites: DMatrix<f64>) -> Result<Self> {
        if directions.shape() != sites.shape() {
            return Err(RegError::InvalidState(format!(
                "directions are {}x{} but sites are {}x{}",
                directions.nrows(),
                directions.ncols(),
                sites.nrows(),
                sites.ncols()
            )));
        }
        Ok(Self { directions, sites })
    }

    /// Number of oriented points.
    pub fn len(&self) -> usize {
        self.directions.nrows()
    }

    /// True when the set holds no oriented points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spatial dimension (2 or 3).
    pub fn dim(&self) -> usize {
        self.directions.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sq_dist_matrix() {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 1.0, 0.0]);
        let b = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 0.0, 2.0, 3.0, 4.0]);

        let dist = sq_dist_matrix(&a, &b);

        assert_eq!(dist.shape(), (2, 3));
        assert_relative_eq!(dist[(0, 0)], 0.0);
        assert_relative_eq!(dist[(0, 1)], 4.0);
        assert_relative_eq!(dist[(0, 2)], 25.0);
        assert_relative_eq!(dist[(1, 2)], 20.0);
    }

    #[test]
    fn test_row_norms() {
        let m = DMatrix::from_row_slice(2, 2, &[3.0, 4.0, 0.0, 0.0]);
        let norms = row_norms(&m);
        assert_relative_eq!(norms[0], 5.0);
        assert_relative_eq!(norms[1], 0.0);
    }

    #[test]
    fn test_normalize_rows_skips_zero_rows() {
        let m = DMatrix::from_row_slice(2, 2, &[3.0, 4.0, 0.0, 0.0]);
        let unit = normalize_rows(&m);
        assert_relative_eq!(unit[(0, 0)], 0.6);
        assert_relative_eq!(unit[(0, 1)], 0.8);
        assert_relative_eq!(unit[(1, 0)], 0.0);
        assert_relative_eq!(unit[(1, 1)], 0.0);
    }

    #[test]
    fn test_oriented_set_shape_check() {
        let dirs = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let sites = DMatrix::from_row_slice(3, 2, &[0.0; 6]);
        assert!(OrientedSet::new(dirs.clone(), sites).is_err());

        let sites = DMatrix::from_row_slice(2, 2, &[0.0; 4]);
        let set = OrientedSet::new(dirs, sites).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.dim(), 2);
    }
}
