//! The warp abstraction produced by external fitting routines.

use nalgebra::{DMatrix, RowDVector};

/// A fitted spatial warp, queryable but opaque.
///
/// Warps are created and owned by a fitting provider; the evaluators and the
/// schedule search only borrow them for read-only queries. Smoothness
/// energies are self-reported: the warp computes its own bending and
/// rotation penalties under caller-supplied coefficients, and the evaluators
/// forward those numbers instead of recomputing them from first principles.
pub trait Warp: Send + Sync {
    /// Map points (one per row) to their warped positions.
    fn transform_points(&self, points: &DMatrix<f64>) -> DMatrix<f64>;

    /// Transport direction vectors attached at `sites` through the warp's
    /// local linearization (Jacobian), not by translation.
    ///
    /// The magnitude of a transported vector is meaningful and must be
    /// preserved; callers normalize when they need orientation only.
    fn transform_vectors(&self, sites: &DMatrix<f64>, vectors: &DMatrix<f64>) -> DMatrix<f64>;

    /// Smoothness (bending) energy under the given coefficient.
    fn bending_energy(&self, bend_coef: f64) -> f64;

    /// Rotation-regularization energy under per-axis coefficients.
    fn rotation_energy(&self, rot_coef: &[f64]) -> f64;
}

/// The identity warp: points and vectors pass through unchanged, both
/// energies are zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityWarp;

impl Warp for IdentityWarp {
    fn transform_points(&self, points: &DMatrix<f64>) -> DMatrix<f64> {
        points.clone()
    }

    fn transform_vectors(&self, _sites: &DMatrix<f64>, vectors: &DMatrix<f64>) -> DMatrix<f64> {
        vectors.clone()
    }

    fn bending_energy(&self, _bend_coef: f64) -> f64 {
        0.0
    }

    fn rotation_energy(&self, _rot_coef: &[f64]) -> f64 {
        0.0
    }
}

/// An affine warp `p ↦ A·p + b` with exact Jacobian `A`.
///
/// Bending energy is zero (an affine map has no curvature). Rotation energy
/// is `tr((A − I)ᵀ R (A − I))` with `R = diag(rot_coef)`, penalizing
/// deviation of the linear part from a rigid rotation.
#[derive(Clone, Debug)]
pub struct AffineWarp {
    linear: DMatrix<f64>,
    translation: RowDVector<f64>,
}

impl AffineWarp {
    /// Build an affine warp from its D×D linear part and 1×D translation.
    ///
    /// # Panics
    /// Panics if `linear` is not square or the translation dimension differs.
    pub fn new(linear: DMatrix<f64>, translation: RowDVector<f64>) -> Self {
        assert_eq!(linear.nrows(), linear.ncols(), "linear part must be square");
        assert_eq!(linear.ncols(), translation.len(), "translation dimension mismatch");
        Self { linear, translation }
    }

    /// Pure translation warp in `dim` dimensions.
    pub fn translation_only(offset: &[f64]) -> Self {
        let dim = offset.len();
        Self::new(
            DMatrix::identity(dim, dim),
            RowDVector::from_row_slice(offset),
        )
    }
}

impl Warp for AffineWarp {
    fn transform_points(&self, points: &DMatrix<f64>) -> DMatrix<f64> {
        let mut out = points * self.linear.transpose();
        for mut row in out.row_iter_mut() {
            for (v, t) in row.iter_mut().zip(self.translation.iter()) {
                *v += t;
            }
        }
        out
    }

    fn transform_vectors(&self, _sites: &DMatrix<f64>, vectors: &DMatrix<f64>) -> DMatrix<f64> {
        vectors * self.linear.transpose()
    }

    fn bending_energy(&self, _bend_coef: f64) -> f64 {
        0.0
    }

    fn rotation_energy(&self, rot_coef: &[f64]) -> f64 {
        let d = self.linear.nrows();
        let deviation = &self.linear - DMatrix::identity(d, d);
        let mut energy = 0.0;
        for i in 0..d {
            let weight = rot_coef.get(i).copied().unwrap_or(0.0);
            for j in 0..d {
                energy += weight * deviation[(i, j)] * deviation[(i, j)];
            }
        }
        energy
    }
}
