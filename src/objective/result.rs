//! Registration results: data, warp, and correspondence bundled for scoring.

use nalgebra::DMatrix;

use crate::core::points::OrientedSet;
use crate::core::warp::Warp;
use crate::error::{RegError, Result};

use super::{oriented_objective, point_objective, OrientedObjective, PointObjective};

/// Objective terms, polymorphic over the model variant.
///
/// Callers must not assume a term count without checking the variant: the
/// point model has 5 terms, the oriented model 8.
#[derive(Clone, Copy, Debug)]
pub enum Objective {
    /// Five-term points-only decomposition.
    Point(PointObjective),
    /// Eight-term points-with-normals decomposition.
    Oriented(OrientedObjective),
}

impl Objective {
    /// The model-specific term vector (length 5 or 8).
    pub fn terms(&self) -> Vec<f64> {
        match self {
            Objective::Point(o) => o.terms().to_vec(),
            Objective::Oriented(o) => o.terms().to_vec(),
        }
    }

    /// Scalar cost: the sum of all terms.
    pub fn total(&self) -> f64 {
        match self {
            Objective::Point(o) => o.total(),
            Objective::Oriented(o) => o.total(),
        }
    }
}

/// A points-only registration awaiting evaluation.
///
/// Borrows the data, warp, and correspondence supplied by a provider for a
/// single schedule; evaluation is a pure read.
pub struct PointRegistration<'a> {
    /// Source points (n×D).
    pub source: &'a DMatrix<f64>,
    /// Target points (m×D).
    pub target: &'a DMatrix<f64>,
    /// The fitted warp.
    pub warp: &'a dyn Warp,
    /// Soft correspondence weights (n×m).
    pub corr: &'a DMatrix<f64>,
    /// Final correspondence temperature the fit was annealed to.
    pub rad: f64,
    /// Bending coefficient the warp was fit with.
    pub bend_coef: f64,
    /// Per-axis rotation coefficients the warp was fit with.
    pub rot_coef: &'a [f64],
}

impl PointRegistration<'_> {
    fn validate(&self) -> Result<()> {
        if self.source.nrows() == 0 || self.target.nrows() == 0 {
            return Err(RegError::InvalidState("empty point set".into()));
        }
        if self.corr.nrows() != self.source.nrows() || self.corr.ncols() != self.target.nrows() {
            return Err(RegError::InvalidState(format!(
                "correspondence is {}x{}, expected {}x{}",
                self.corr.nrows(),
                self.corr.ncols(),
                self.source.nrows(),
                self.target.nrows()
            )));
        }
        if !(self.rad > 0.0) {
            return Err(RegError::InvalidState(format!(
                "temperature must be positive, got {}",
                self.rad
            )));
        }
        Ok(())
    }
}

/// A points-with-normals registration awaiting evaluation.
pub struct OrientedRegistration<'a> {
    /// Source sites (l×D).
    pub source: &'a DMatrix<f64>,
    /// Source directions at their base sites (r rows).
    pub source_normals: &'a OrientedSet,
    /// Target sites (m×D).
    pub target: &'a DMatrix<f64>,
    /// Target directions at their base sites (s rows).
    pub target_normals: &'a OrientedSet,
    /// The fitted warp.
    pub warp: &'a dyn Warp,
    /// Point correspondence weights (l×m).
    pub corr_points: &'a DMatrix<f64>,
    /// Normal correspondence weights (r×s).
    pub corr_normals: &'a DMatrix<f64>,
    /// Final point temperature the fit was annealed to.
    pub rad: f64,
    /// Final normal temperature the fit was annealed to.
    pub radn: f64,
    /// Bending coefficient the warp was fit with.
    pub bend_coef: f64,
    /// Per-axis rotation coefficients the warp was fit with.
    pub rot_coef: &'a [f64],
}

impl OrientedRegistration<'_> {
    fn validate(&self) -> Result<()> {
        if self.source.nrows() == 0 || self.target.nrows() == 0 {
            return Err(RegError::InvalidState("empty point set".into()));
        }
        if self.source_normals.is_empty() || self.target_normals.is_empty() {
            return Err(RegError::InvalidState("empty oriented set".into()));
        }
        if self.corr_points.nrows() != self.source.nrows()
            || self.corr_points.ncols() != self.target.nrows()
        {
            return Err(RegError::InvalidState(format!(
                "point correspondence is {}x{}, expected {}x{}",
                self.corr_points.nrows(),
                self.corr_points.ncols(),
                self.source.nrows(),
                self.target.nrows()
            )));
        }
        if self.corr_normals.nrows() != self.source_normals.len()
            || self.corr_normals.ncols() != self.target_normals.len()
        {
            return Err(RegError::InvalidState(format!(
                "normal correspondence is {}x{}, expected {}x{}",
                self.corr_normals.nrows(),
                self.corr_normals.ncols(),
                self.source_normals.len(),
                self.target_normals.len()
            )));
        }
        if !(self.rad > 0.0) || !(self.radn > 0.0) {
            return Err(RegError::InvalidState(format!(
                "temperatures must be positive, got rad={} radn={}",
                self.rad, self.radn
            )));
        }
        Ok(())
    }
}

/// A registration result for one provider invocation, polymorphic over the
/// model variant.
pub enum Registration<'a> {
    /// Points-only registration.
    Point(PointRegistration<'a>),
    /// Points-with-normals registration.
    Oriented(OrientedRegistration<'a>),
}

impl Registration<'_> {
    /// Evaluate the model-specific objective.
    ///
    /// Shapes and temperatures are checked first; inconsistent inputs are an
    /// [`RegError::InvalidState`], never a silently wrong score.
    pub fn objective(&self) -> Result<Objective> {
        match self {
            Registration::Point(reg) => {
                reg.validate()?;
                Ok(Objective::Point(point_objective(
                    reg.source,
                    reg.target,
                    reg.warp,
                    reg.corr,
                    reg.rad,
                    reg.bend_coef,
                    reg.rot_coef,
                )))
            }
            Registration::Oriented(reg) => {
                reg.validate()?;
                Ok(Objective::Oriented(oriented_objective(
                    reg.source,
                    reg.source_normals,
                    reg.target,
                    reg.target_normals,
                    reg.warp,
                    reg.corr_points,
                    reg.corr_normals,
                    reg.rad,
                    reg.radn,
                    reg.bend_coef,
                    reg.rot_coef,
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::warp::IdentityWarp;

    const ROT_REG: [f64; 2] = [1e-4, 1e-4];

    #[test]
    fn test_point_registration_term_count() {
        let x = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 1.0, 0.0]);
        let y = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 1.0]);
        let corr = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);

        let reg = Registration::Point(PointRegistration {
            source: &x,
            target: &y,
            warp: &IdentityWarp,
            corr: &corr,
            rad: 0.01,
            bend_coef: 0.1,
            rot_coef: &ROT_REG,
        });

        let objective = reg.objective().unwrap();
        assert_eq!(objective.terms().len(), 5);
    }

    #[test]
    fn test_mismatched_correspondence_is_invalid_state() {
        let x = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 1.0, 0.0]);
        let y = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 1.0]);
        let corr = DMatrix::from_row_slice(1, 1, &[1.0]);

        let reg = Registration::Point(PointRegistration {
            source: &x,
            target: &y,
            warp: &IdentityWarp,
            corr: &corr,
            rad: 0.01,
            bend_coef: 0.1,
            rot_coef: &ROT_REG,
        });

        assert!(matches!(reg.objective(), Err(RegError::InvalidState(_))));
    }

    #[test]
    fn test_non_positive_temperature_is_invalid_state() {
        let x = DMatrix::from_row_slice(1, 2, &[0.0, 0.0]);
        let y = DMatrix::from_row_slice(1, 2, &[1.0, 0.0]);
        let corr = DMatrix::from_row_slice(1, 1, &[1.0]);

        let reg = Registration::Point(PointRegistration {
            source: &x,
            target: &y,
            warp: &IdentityWarp,
            corr: &corr,
            rad: 0.0,
            bend_coef: 0.1,
            rot_coef: &ROT_REG,
        });

        assert!(matches!(reg.objective(), Err(RegError::InvalidState(_))));
    }

    #[test]
    fn test_oriented_registration_term_count() {
        let x = DMatrix::from_row_slice(1, 2, &[0.0, 0.0]);
        let y = DMatrix::from_row_slice(1, 2, &[1.0, 0.0]);
        let normals = OrientedSet::new(
            DMatrix::from_row_slice(1, 2, &[0.0, 1.0]),
            DMatrix::from_row_slice(1, 2, &[0.5, 0.0]),
        )
        .unwrap();
        let corr = DMatrix::from_row_slice(1, 1, &[0.5]);

        let reg = Registration::Oriented(OrientedRegistration {
            source: &x,
            source_normals: &normals,
            target: &y,
            target_normals: &normals,
            warp: &IdentityWarp,
            corr_points: &corr,
            corr_normals: &corr,
            rad: 0.01,
            radn: 0.001,
            bend_coef: 0.1,
            rot_coef: &ROT_REG,
        });

        let objective = reg.objective().unwrap();
        assert_eq!(objective.terms().len(), 8);
    }
}
