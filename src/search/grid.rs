//! Grid enumeration over annealing schedules with a deterministic argmin.

use log::{debug, warn};
use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::core::points::OrientedSet;
use crate::core::schedule::{NormalSchedule, PointSchedule};
use crate::error::{RegError, Result};
use crate::objective::{oriented_objective, point_objective, OrientedObjective, PointObjective};

use super::config::{OrientedSearchConfig, PointSearchConfig};
use super::provider::{OrientedFit, OrientedProvider, PointFit, PointProvider};

/// Best schedule found for the points-only model.
pub struct PointSearchOutcome {
    /// The winning schedule.
    pub schedule: PointSchedule,
    /// Its summed objective.
    pub cost: f64,
    /// The full term decomposition at the winning schedule.
    pub objective: PointObjective,
    /// The winning fit, retained for downstream use (e.g. visualization).
    pub fit: PointFit,
}

/// Best schedule found for the points-with-normals model.
pub struct OrientedSearchOutcome {
    /// The winning schedule.
    pub schedule: NormalSchedule,
    /// Its summed objective.
    pub cost: f64,
    /// The full term decomposition at the winning schedule.
    pub objective: OrientedObjective,
    /// The winning fit, retained for downstream use.
    pub fit: OrientedFit,
}

/// Search the point-model schedule space.
///
/// Enumerates `rad_init × reg_init` in declared candidate order, pruning
/// combinations that do not cool against the fixed final values, fits each
/// survivor through `provider`, and keeps the strictly smallest summed
/// objective. Equal costs keep the earliest-enumerated combination.
/// Provider failures and non-finite costs make a candidate non-competitive
/// without aborting the search.
///
/// # Errors
/// [`RegError::NoValidSchedule`] when the candidate sets are empty, every
/// combination was pruned, or no surviving candidate produced a finite cost.
pub fn search_point_schedule(
    source: &DMatrix<f64>,
    target: &DMatrix<f64>,
    provider: &dyn PointProvider,
    config: &PointSearchConfig,
) -> Result<PointSearchOutcome> {
    let mut schedules = Vec::new();
    for &rad_init in &config.rad_init {
        for &reg_init in &config.reg_init {
            let schedule = PointSchedule {
                rad_init,
                rad_final: config.rad_final,
                reg_init,
                reg_final: config.reg_final,
            };
            if !schedule.cools() {
                continue;
            }
            schedules.push(schedule);
        }
    }
    debug!(
        "point schedule search: {} of {} combinations survive pruning",
        schedules.len(),
        config.search_space_size()
    );

    let params = config.fit_params();
    let evaluate = |schedule: &PointSchedule| -> (f64, Option<(PointObjective, PointFit)>) {
        match provider.fit(source, target, schedule, &params) {
            Ok(fit) => {
                let objective = point_objective(
                    source,
                    target,
                    fit.warp.as_ref(),
                    &fit.corr,
                    schedule.rad_final,
                    schedule.reg_final,
                    &params.rot_reg,
                );
                let cost = objective.total();
                debug!("schedule {:?} -> cost {}", schedule, cost);
                if cost.is_nan() {
                    warn!("schedule {:?} produced a non-finite cost", schedule);
                    (f64::INFINITY, None)
                } else {
                    (cost, Some((objective, fit)))
                }
            }
            Err(err) => {
                warn!("schedule {:?} rejected: {}", schedule, err);
                (f64::INFINITY, None)
            }
        }
    };

    // Parallel evaluation collects in enumeration order so the reduction
    // below sees candidates exactly as the sequential loop would.
    let scored: Vec<_> = if config.use_parallel {
        schedules.par_iter().map(evaluate).collect()
    } else {
        schedules.iter().map(evaluate).collect()
    };

    let mut best: Option<PointSearchOutcome> = None;
    for (schedule, (cost, payload)) in schedules.iter().zip(scored) {
        let Some((objective, fit)) = payload else {
            continue;
        };
        // Strict less-than keeps the earliest-enumerated winner on ties.
        if best.as_ref().map_or(true, |b| cost < b.cost) {
            best = Some(PointSearchOutcome {
                schedule: *schedule,
                cost,
                objective,
                fit,
            });
        }
    }

    best.ok_or_else(|| {
        RegError::NoValidSchedule("every point-model candidate was pruned or failed".into())
    })
}

/// Search the oriented-model schedule space.
///
/// Enumeration nests `rad_init`, `reg_init`, `radn_init`, `radn_final`,
/// `nu_init`, `nu_final` (outermost to innermost) in declared candidate
/// order; pruning, scoring, and the tie-break follow
/// [`search_point_schedule`].
///
/// # Errors
/// [`RegError::NoValidSchedule`] under the same conditions as the
/// point-model search.
pub fn search_oriented_schedule(
    source: &DMatrix<f64>,
    source_normals: &OrientedSet,
    target: &DMatrix<f64>,
    target_normals: &OrientedSet,
    provider: &dyn OrientedProvider,
    config: &OrientedSearchConfig,
) -> Result<OrientedSearchOutcome> {
    let mut schedules = Vec::new();
    for &rad_init in &config.rad_init {
        for &reg_init in &config.reg_init {
            for &radn_init in &config.radn_init {
                for &radn_final in &config.radn_final {
                    for &nu_init in &config.nu_init {
                        for &nu_final in &config.nu_final {
                            let schedule = NormalSchedule {
                                point: PointSchedule {
                                    rad_init,
                                    rad_final: config.rad_final,
                                    reg_init,
                                    reg_final: config.reg_final,
                                },
                                radn_init,
                                radn_final,
                                nu_init,
                                nu_final,
                            };
                            if !schedule.cools() {
                                continue;
                            }
                            schedules.push(schedule);
                        }
                    }
                }
            }
        }
    }
    debug!(
        "oriented schedule search: {} of {} combinations survive pruning",
        schedules.len(),
        config.search_space_size()
    );

    let params = config.fit_params();
    let evaluate = |schedule: &NormalSchedule| -> (f64, Option<(OrientedObjective, OrientedFit)>) {
        match provider.fit(
            source,
            source_normals,
            target,
            target_normals,
            schedule,
            &params,
        ) {
            Ok(fit) => {
                let objective = oriented_objective(
                    source,
                    source_normals,
                    target,
                    target_normals,
                    fit.warp.as_ref(),
                    &fit.corr_points,
                    &fit.corr_normals,
                    schedule.point.rad_final,
                    schedule.radn_final,
                    schedule.point.reg_final,
                    &params.rot_reg,
                );
                let cost = objective.total();
                debug!("schedule {:?} -> cost {}", schedule, cost);
                if cost.is_nan() {
                    warn!("schedule {:?} produced a non-finite cost", schedule);
                    (f64::INFINITY, None)
                } else {
                    (cost, Some((objective, fit)))
                }
            }
            Err(err) => {
                warn!("schedule {:?} rejected: {}", schedule, err);
                (f64::INFINITY, None)
            }
        }
    };

    let scored: Vec<_> = if config.use_parallel {
        schedules.par_iter().map(evaluate).collect()
    } else {
        schedules.iter().map(evaluate).collect()
    };

    let mut best: Option<OrientedSearchOutcome> = None;
    for (schedule, (cost, payload)) in schedules.iter().zip(scored) {
        let Some((objective, fit)) = payload else {
            continue;
        };
        if best.as_ref().map_or(true, |b| cost < b.cost) {
            best = Some(OrientedSearchOutcome {
                schedule: *schedule,
                cost,
                objective,
                fit,
            });
        }
    }

    best.ok_or_else(|| {
        RegError::NoValidSchedule("every oriented-model candidate was pruned or failed".into())
    })
}
