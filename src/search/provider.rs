//! Contracts for external warp-and-correspondence fitting routines.
//!
//! The solvers that fit a warp jointly with a soft correspondence are
//! external collaborators: the search drives them through these traits and
//! never looks inside. How a correspondence is derived from distances is
//! solver-internal.

use nalgebra::DMatrix;

use crate::core::points::OrientedSet;
use crate::core::schedule::{NormalSchedule, PointSchedule};
use crate::core::warp::Warp;
use crate::error::Result;

/// Fitting parameters shared by both models and held constant across a
/// schedule search.
#[derive(Clone, Debug)]
pub struct FitParams {
    /// Per-axis rotation regularization coefficients.
    pub rot_reg: Vec<f64>,
    /// Number of expectation-maximization rounds per annealing step.
    pub em_iter: usize,
}

/// A fitted points-only registration returned by a provider.
pub struct PointFit {
    /// The fitted warp, owned by the fit.
    pub warp: Box<dyn Warp>,
    /// Soft correspondence weights (n×m).
    pub corr: DMatrix<f64>,
}

/// A fitted points-with-normals registration returned by a provider.
pub struct OrientedFit {
    /// The fitted warp, owned by the fit.
    pub warp: Box<dyn Warp>,
    /// Point correspondence weights (l×m).
    pub corr_points: DMatrix<f64>,
    /// Normal correspondence weights (r×s).
    pub corr_normals: DMatrix<f64>,
}

/// External solver for the points-only model.
///
/// One call fits one schedule candidate synchronously. Failures
/// (non-convergence, singular fit) are reported as errors; the search
/// records the candidate as non-competitive and continues.
pub trait PointProvider: Send + Sync {
    /// Fit a warp and correspondence for one annealing schedule.
    fn fit(
        &self,
        source: &DMatrix<f64>,
        target: &DMatrix<f64>,
        schedule: &PointSchedule,
        params: &FitParams,
    ) -> Result<PointFit>;
}

/// External solver for the points-with-normals model.
pub trait OrientedProvider: Send + Sync {
    /// Fit a warp and both correspondences for one annealing schedule.
    #[allow(clippy::too_many_arguments)]
    fn fit(
        &self,
        source: &DMatrix<f64>,
        source_normals: &OrientedSet,
        target: &DMatrix<f64>,
        target_normals: &OrientedSet,
        schedule: &NormalSchedule,
        params: &FitParams,
    ) -> Result<OrientedFit>;
}
