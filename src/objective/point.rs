//! Five-term objective for points-only registration.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::core::points::sq_dist_matrix;
use crate::core::warp::Warp;

/// Decomposed cost of a points-only registration.
///
/// Field order matches [`PointObjective::terms`]: alignment, bending,
/// rotation, entropy, negative mass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointObjective {
    /// Correspondence-weighted mean squared alignment error.
    pub alignment: f64,
    /// Warp-reported bending energy.
    pub bending: f64,
    /// Warp-reported rotation regularization.
    pub rotation: f64,
    /// Gibbs entropy of the correspondence over its strictly-positive support.
    pub entropy: f64,
    /// Negative correspondence mass over the same support.
    pub neg_mass: f64,
}

impl PointObjective {
    /// The five terms in fixed order.
    pub fn terms(&self) -> [f64; 5] {
        [
            self.alignment,
            self.bending,
            self.rotation,
            self.entropy,
            self.neg_mass,
        ]
    }

    /// Scalar cost: the sum of all terms.
    pub fn total(&self) -> f64 {
        self.terms().iter().sum()
    }
}

/// Evaluate the five-term objective for a points-only registration.
///
/// The bending and rotation terms are forwarded from the warp's own energy
/// report under the coefficients the warp was fit with; they are not
/// recomputed here. Entropy-like terms are restricted to the
/// strictly-positive support of `corr`, so an all-zero correspondence
/// contributes zero rather than a log-domain fault.
///
/// # Arguments
/// * `x` - source points (n×D), n > 0
/// * `y` - target points (m×D)
/// * `warp` - fitted warp, queried read-only
/// * `corr` - soft correspondence weights (n×m); zero means "no assignment"
/// * `rad` - final correspondence temperature (> 0)
/// * `bend_coef` - bending coefficient the warp was fit with
/// * `rot_coef` - per-axis rotation coefficients the warp was fit with
pub fn point_objective(
    x: &DMatrix<f64>,
    y: &DMatrix<f64>,
    warp: &dyn Warp,
    corr: &DMatrix<f64>,
    rad: f64,
    bend_coef: f64,
    rot_coef: &[f64],
) -> PointObjective {
    let n = x.nrows() as f64;
    let warped = warp.transform_points(x);
    let dist = sq_dist_matrix(&warped, y);
    let alignment = corr.component_mul(&dist).sum() / n;

    let (entropy, neg_mass) = support_entropy(corr, 2.0 * rad / n);

    PointObjective {
        alignment,
        bending: warp.bending_energy(bend_coef),
        rotation: warp.rotation_energy(rot_coef),
        entropy,
        neg_mass,
    }
}

/// Entropy and negative-mass sums over the strictly-positive support.
///
/// Returns `(scale · Σ p·ln p, −scale · Σ p)`. Zero entries are excluded
/// before the logarithm; an empty support yields `(0, 0)`.
pub(crate) fn support_entropy(corr: &DMatrix<f64>, scale: f64) -> (f64, f64) {
    let mut plogp = 0.0;
    let mut mass = 0.0;
    for &p in corr.iter() {
        if p > 0.0 {
            plogp += p * p.ln();
            mass += p;
        }
    }
    (scale * plogp, -scale * mass)
}
