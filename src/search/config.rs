//! Schedule-search configuration: candidate sets per hyperparameter.
//!
//! Candidate sets are caller-supplied rather than baked into the search
//! logic; scenes that need different final temperatures override the fixed
//! values before searching.

use serde::{Deserialize, Serialize};

use super::provider::FitParams;

/// Configuration for the points-only schedule search.
///
/// Candidate order is significant: equal achieved costs keep the
/// earliest-enumerated combination, so reordering a candidate set can
/// change which of several tied schedules is reported.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointSearchConfig {
    /// Initial correspondence-temperature candidates.
    #[serde(default = "default_rad_init")]
    pub rad_init: Vec<f64>,

    /// Initial regularization-weight candidates.
    #[serde(default = "default_reg_init")]
    pub reg_init: Vec<f64>,

    /// Final correspondence temperature, held constant across the search.
    #[serde(default = "default_rad_final")]
    pub rad_final: f64,

    /// Final regularization weight, held constant across the search.
    #[serde(default = "default_reg_final")]
    pub reg_final: f64,

    /// Per-axis rotation regularization coefficients.
    #[serde(default = "default_rot_reg")]
    pub rot_reg: Vec<f64>,

    /// Expectation-maximization rounds per annealing step.
    #[serde(default = "default_em_iter")]
    pub em_iter: usize,

    /// Evaluate schedule candidates in parallel with rayon.
    /// Results are reduced in enumeration order, so the selected schedule
    /// is identical to the sequential search.
    #[serde(default)]
    pub use_parallel: bool,
}

fn default_rad_init() -> Vec<f64> {
    vec![0.1, 1.0, 10.0]
}

fn default_reg_init() -> Vec<f64> {
    vec![0.1, 1.0, 10.0]
}

fn default_rad_final() -> f64 {
    0.01
}

fn default_reg_final() -> f64 {
    0.1
}

fn default_rot_reg() -> Vec<f64> {
    vec![1e-4, 1e-4]
}

fn default_em_iter() -> usize {
    5
}

fn default_radn_init() -> Vec<f64> {
    vec![0.005, 0.05, 0.5]
}

fn default_radn_final() -> Vec<f64> {
    vec![0.001, 0.01, 0.1]
}

fn default_nu_init() -> Vec<f64> {
    vec![0.1, 1.0, 10.0]
}

fn default_nu_final() -> Vec<f64> {
    vec![0.01, 0.1, 1.0]
}

impl Default for PointSearchConfig {
    fn default() -> Self {
        Self {
            rad_init: default_rad_init(),
            reg_init: default_reg_init(),
            rad_final: default_rad_final(),
            reg_final: default_reg_final(),
            rot_reg: default_rot_reg(),
            em_iter: default_em_iter(),
            use_parallel: false,
        }
    }
}

impl PointSearchConfig {
    /// Number of schedule combinations before pruning.
    pub fn search_space_size(&self) -> usize {
        self.rad_init.len() * self.reg_init.len()
    }

    pub(crate) fn fit_params(&self) -> FitParams {
        FitParams {
            rot_reg: self.rot_reg.clone(),
            em_iter: self.em_iter,
        }
    }
}

/// Configuration for the points-with-normals schedule search.
///
/// The normal-temperature ramp varies on both ends; the point-model final
/// values stay fixed like in [`PointSearchConfig`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrientedSearchConfig {
    /// Initial correspondence-temperature candidates.
    #[serde(default = "default_rad_init")]
    pub rad_init: Vec<f64>,

    /// Initial regularization-weight candidates.
    #[serde(default = "default_reg_init")]
    pub reg_init: Vec<f64>,

    /// Final correspondence temperature, held constant across the search.
    #[serde(default = "default_rad_final")]
    pub rad_final: f64,

    /// Final regularization weight, held constant across the search.
    #[serde(default = "default_reg_final")]
    pub reg_final: f64,

    /// Initial normal-temperature candidates.
    #[serde(default = "default_radn_init")]
    pub radn_init: Vec<f64>,

    /// Final normal-temperature candidates.
    #[serde(default = "default_radn_final")]
    pub radn_final: Vec<f64>,

    /// Initial nu-weight candidates.
    #[serde(default = "default_nu_init")]
    pub nu_init: Vec<f64>,

    /// Final nu-weight candidates.
    #[serde(default = "default_nu_final")]
    pub nu_final: Vec<f64>,

    /// Per-axis rotation regularization coefficients.
    #[serde(default = "default_rot_reg")]
    pub rot_reg: Vec<f64>,

    /// Expectation-maximization rounds per annealing step.
    #[serde(default = "default_em_iter")]
    pub em_iter: usize,

    /// Evaluate schedule candidates in parallel with rayon.
    #[serde(default)]
    pub use_parallel: bool,
}

impl Default for OrientedSearchConfig {
    fn default() -> Self {
        Self {
            rad_init: default_rad_init(),
            reg_init: default_reg_init(),
            rad_final: default_rad_final(),
            reg_final: default_reg_final(),
            radn_init: default_radn_init(),
            radn_final: default_radn_final(),
            nu_init: default_nu_init(),
            nu_final: default_nu_final(),
            rot_reg: default_rot_reg(),
            em_iter: default_em_iter(),
            use_parallel: false,
        }
    }
}

impl OrientedSearchConfig {
    /// Number of schedule combinations before pruning.
    pub fn search_space_size(&self) -> usize {
        self.rad_init.len()
            * self.reg_init.len()
            * self.radn_init.len()
            * self.radn_final.len()
            * self.nu_init.len()
            * self.nu_final.len()
    }

    pub(crate) fn fit_params(&self) -> FitParams {
        FitParams {
            rot_reg: self.rot_reg.clone(),
            em_iter: self.em_iter,
        }
    }
}
