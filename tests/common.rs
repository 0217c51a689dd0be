//! Test utilities for the schedule-search integration tests.
//!
//! Provides deterministic stub providers and small fixture problems so the
//! search pipeline can be exercised without a real warp solver.

#![allow(dead_code)]

use nalgebra::DMatrix;

use milan_reg::{
    AffineWarp, FitParams, IdentityWarp, NormalSchedule, OrientedFit, OrientedProvider,
    OrientedSet, PointFit, PointProvider, PointSchedule, RegError, Result,
};

/// A two-point source/target pair one unit apart.
pub fn two_point_problem() -> (DMatrix<f64>, DMatrix<f64>) {
    let source = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 1.0, 0.0]);
    let target = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 1.0]);
    (source, target)
}

/// Upward unit normals attached at the given points.
pub fn upward_normals(points: &DMatrix<f64>) -> OrientedSet {
    let mut directions = DMatrix::zeros(points.nrows(), points.ncols());
    for i in 0..points.nrows() {
        directions[(i, 1)] = 1.0;
    }
    OrientedSet {
        directions,
        sites: points.clone(),
    }
}

/// Identity correspondence scaled by `weight`.
pub fn diagonal_corr(n: usize, weight: f64) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |i, j| if i == j { weight } else { 0.0 })
}

/// Provider that fits the exact translation between the (equal-cardinality)
/// source and target centroids and reports a diagonal correspondence.
///
/// Deterministic and schedule-independent except through the weight
/// function, which lets a test shape the cost landscape over schedules.
pub struct CentroidProvider {
    /// Weight of each diagonal correspondence entry for a given schedule.
    pub weight_fn: fn(&PointSchedule) -> f64,
}

impl CentroidProvider {
    /// Provider with a constant unit correspondence weight.
    pub fn uniform() -> Self {
        Self { weight_fn: |_| 1.0 }
    }

    fn offset(source: &DMatrix<f64>, target: &DMatrix<f64>) -> Vec<f64> {
        let n = source.nrows() as f64;
        (0..source.ncols())
            .map(|d| (target.column(d).sum() - source.column(d).sum()) / n)
            .collect()
    }
}

impl PointProvider for CentroidProvider {
    fn fit(
        &self,
        source: &DMatrix<f64>,
        target: &DMatrix<f64>,
        schedule: &PointSchedule,
        _params: &FitParams,
    ) -> Result<PointFit> {
        let offset = Self::offset(source, target);
        Ok(PointFit {
            warp: Box::new(AffineWarp::translation_only(&offset)),
            corr: diagonal_corr(source.nrows(), (self.weight_fn)(schedule)),
        })
    }
}

/// Oriented provider built on the same centroid translation.
pub struct OrientedCentroidProvider;

impl OrientedProvider for OrientedCentroidProvider {
    fn fit(
        &self,
        source: &DMatrix<f64>,
        source_normals: &OrientedSet,
        target: &DMatrix<f64>,
        target_normals: &OrientedSet,
        _schedule: &NormalSchedule,
        _params: &FitParams,
    ) -> Result<OrientedFit> {
        if source.nrows() != target.nrows() || source_normals.len() != target_normals.len() {
            return Err(RegError::Provider(
                "centroid provider needs equal cardinalities".into(),
            ));
        }
        let offset = CentroidProvider::offset(source, target);
        Ok(OrientedFit {
            warp: Box::new(AffineWarp::translation_only(&offset)),
            corr_points: diagonal_corr(source.nrows(), 1.0),
            corr_normals: diagonal_corr(source_normals.len(), 1.0),
        })
    }
}

/// Oriented provider with a fixed small translation and uniform
/// correspondences.
///
/// The offset keeps warped sites away from exact coincidence with target
/// sites, which would put a zero distance under the cross-entropy log.
pub struct SmallShiftProvider;

impl OrientedProvider for SmallShiftProvider {
    fn fit(
        &self,
        source: &DMatrix<f64>,
        source_normals: &OrientedSet,
        target: &DMatrix<f64>,
        target_normals: &OrientedSet,
        _schedule: &NormalSchedule,
        _params: &FitParams,
    ) -> Result<OrientedFit> {
        let n = source.nrows();
        let m = target.nrows();
        let r = source_normals.len();
        let s = target_normals.len();
        Ok(OrientedFit {
            warp: Box::new(AffineWarp::translation_only(&[0.0513, 0.0207])),
            corr_points: DMatrix::from_element(n, m, 1.0 / (n * m) as f64),
            corr_normals: DMatrix::from_element(r, s, 1.0 / (r * s) as f64),
        })
    }
}

/// Provider that always reports non-convergence.
pub struct AlwaysFailingProvider;

impl PointProvider for AlwaysFailingProvider {
    fn fit(
        &self,
        _source: &DMatrix<f64>,
        _target: &DMatrix<f64>,
        _schedule: &PointSchedule,
        _params: &FitParams,
    ) -> Result<PointFit> {
        Err(RegError::Provider("did not converge".into()))
    }
}

impl OrientedProvider for AlwaysFailingProvider {
    fn fit(
        &self,
        _source: &DMatrix<f64>,
        _source_normals: &OrientedSet,
        _target: &DMatrix<f64>,
        _target_normals: &OrientedSet,
        _schedule: &NormalSchedule,
        _params: &FitParams,
    ) -> Result<OrientedFit> {
        Err(RegError::Provider("did not converge".into()))
    }
}

/// Provider returning the identity warp with a uniform correspondence, for
/// tests that only need a valid fit of the right shape.
pub struct IdentityProvider;

impl PointProvider for IdentityProvider {
    fn fit(
        &self,
        source: &DMatrix<f64>,
        target: &DMatrix<f64>,
        _schedule: &PointSchedule,
        _params: &FitParams,
    ) -> Result<PointFit> {
        let n = source.nrows();
        let m = target.nrows();
        Ok(PointFit {
            warp: Box::new(IdentityWarp),
            corr: DMatrix::from_element(n, m, 1.0 / (n * m) as f64),
        })
    }
}

impl OrientedProvider for IdentityProvider {
    fn fit(
        &self,
        source: &DMatrix<f64>,
        source_normals: &OrientedSet,
        target: &DMatrix<f64>,
        target_normals: &OrientedSet,
        _schedule: &NormalSchedule,
        _params: &FitParams,
    ) -> Result<OrientedFit> {
        let n = source.nrows();
        let m = target.nrows();
        let r = source_normals.len();
        let s = target_normals.len();
        Ok(OrientedFit {
            warp: Box::new(IdentityWarp),
            corr_points: DMatrix::from_element(n, m, 1.0 / (n * m) as f64),
            corr_normals: DMatrix::from_element(r, s, 1.0 / (r * s) as f64),
        })
    }
}
