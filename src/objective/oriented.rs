//! Eight-term objective for registration with oriented points.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::core::points::{normalize_rows, sq_dist_matrix, OrientedSet};
use crate::core::warp::Warp;

use super::point::support_entropy;

/// Decomposed cost of a points-with-normals registration.
///
/// Field order matches [`OrientedObjective::terms`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientedObjective {
    /// Correspondence-weighted mean squared site alignment error.
    pub point_align: f64,
    /// Correspondence-weighted mean squared direction alignment error,
    /// computed on unit-normalized warped directions.
    pub normal_align: f64,
    /// Warp-reported bending energy.
    pub bending: f64,
    /// Warp-reported rotation regularization.
    pub rotation: f64,
    /// Gibbs entropy of the point correspondence over its positive support.
    pub point_entropy: f64,
    /// Negative point-correspondence mass over the same support.
    pub point_neg_mass: f64,
    /// Cross-entropy of the normal correspondence against warped site
    /// distances, over the positive support of the normal correspondence.
    pub normal_entropy: f64,
    /// Negative normal-correspondence mass over the same support.
    pub normal_neg_mass: f64,
}

impl OrientedObjective {
    /// The eight terms in fixed order: point alignment, normal alignment,
    /// bending, rotation, point entropy, point negative mass, normal
    /// entropy, normal negative mass.
    pub fn terms(&self) -> [f64; 8] {
        [
            self.point_align,
            self.normal_align,
            self.bending,
            self.rotation,
            self.point_entropy,
            self.point_neg_mass,
            self.normal_entropy,
            self.normal_neg_mass,
        ]
    }

    /// Scalar cost: the sum of all terms.
    pub fn total(&self) -> f64 {
        self.terms().iter().sum()
    }
}

/// Evaluate the eight-term objective for an oriented registration.
///
/// Source sites are warped as points; source directions are transported
/// through the warp's local linearization at their base sites, and their
/// base sites are additionally warped as points for the cross-entropy term.
/// Transported directions carry a meaningful magnitude (beta), so they are
/// scaled back to unit length before the orientation distance matrix.
///
/// # Arguments
/// * `x` - source sites (l×D), l > 0
/// * `source_normals` - source directions at their base sites (r rows), r > 0
/// * `y` - target sites (m×D)
/// * `target_normals` - target directions at their base sites (s rows)
/// * `warp` - fitted warp, queried read-only
/// * `corr_points` - point correspondence (l×m)
/// * `corr_normals` - normal correspondence (r×s)
/// * `rad`, `radn` - final point and normal temperatures (> 0)
/// * `bend_coef`, `rot_coef` - coefficients the warp was fit with
#[allow(clippy::too_many_arguments)]
pub fn oriented_objective(
    x: &DMatrix<f64>,
    source_normals: &OrientedSet,
    y: &DMatrix<f64>,
    target_normals: &OrientedSet,
    warp: &dyn Warp,
    corr_points: &DMatrix<f64>,
    corr_normals: &DMatrix<f64>,
    rad: f64,
    radn: f64,
    bend_coef: f64,
    rot_coef: &[f64],
) -> OrientedObjective {
    let l = x.nrows() as f64;
    let r = source_normals.len() as f64;

    let x_warped = warp.transform_points(x);
    let u_warped = warp.transform_vectors(&source_normals.sites, &source_normals.directions);
    let z_warped = warp.transform_points(&source_normals.sites);

    // beta = per-row magnitude of the transported directions; compare
    // orientation only.
    let u_unit = normalize_rows(&u_warped);

    let dist_points = sq_dist_matrix(&x_warped, y);
    let dist_normals = sq_dist_matrix(&u_unit, &target_normals.directions);
    let site_dist = sq_dist_matrix(&z_warped, &target_normals.sites);

    let point_align = corr_points.component_mul(&dist_points).sum() / l;
    let normal_align = corr_normals.component_mul(&dist_normals).sum() / r;

    let (point_entropy, point_neg_mass) = support_entropy(corr_points, 2.0 * rad / l);
    let (normal_entropy, normal_neg_mass) =
        cross_entropy(corr_normals, &site_dist, 2.0 * radn / r);

    OrientedObjective {
        point_align,
        normal_align,
        bending: warp.bending_energy(bend_coef),
        rotation: warp.rotation_energy(rot_coef),
        point_entropy,
        point_neg_mass,
        normal_entropy,
        normal_neg_mass,
    }
}

/// Cross-entropy and negative-mass sums over the positive support of `corr`.
///
/// Returns `(scale · Σ q·ln(q / site_dist), −scale · Σ q)`. Both matrices
/// are walked together in storage order so the zero mask derived from
/// `corr` selects the matching `site_dist` entries; the mask is never
/// recomputed from `site_dist`.
fn cross_entropy(corr: &DMatrix<f64>, site_dist: &DMatrix<f64>, scale: f64) -> (f64, f64) {
    debug_assert_eq!(corr.shape(), site_dist.shape());
    let mut qlogq = 0.0;
    let mut mass = 0.0;
    for (&q, &d) in corr.iter().zip(site_dist.iter()) {
        if q > 0.0 {
            qlogq += q * (q / d).ln();
            mass += q;
        }
    }
    (scale * qlogq, -scale * mass)
}
