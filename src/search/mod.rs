//! Annealing-schedule search over provider-fitted registrations.
//!
//! The search enumerates candidate schedules in declared order, prunes
//! combinations that do not cool, fits each survivor through an external
//! [`PointProvider`]/[`OrientedProvider`], scores the result with the
//! matching objective evaluator, and keeps the strictly smallest cost.

mod config;
mod grid;
mod provider;

pub use config::{OrientedSearchConfig, PointSearchConfig};
pub use grid::{
    search_oriented_schedule, search_point_schedule, OrientedSearchOutcome, PointSearchOutcome,
};
pub use provider::{FitParams, OrientedFit, OrientedProvider, PointFit, PointProvider};
