//! # MilanReg
//!
//! Objective evaluation and annealing-schedule search for non-rigid
//! point-set registration.
//!
//! ## Overview
//!
//! MilanReg scores fitted registrations and searches over annealing
//! schedules for the one that scores best:
//!
//! - **Objective evaluation**: a 5-term decomposition for the points-only
//!   model and an 8-term decomposition for the points-with-normals model
//! - **Schedule search**: grid enumeration over initial/final hyperparameter
//!   candidates, pruning schedules that heat instead of cool
//! - **Providers**: the solvers that actually fit a warp and soft
//!   correspondence plug in behind a trait; the search treats them as black
//!   boxes
//! - **Demo scenes**: five built-in 2D contour-registration problems
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use milan_reg::{search_oriented_schedule, OrientedSearchConfig, Scene};
//!
//! let scene = Scene::demo(3);
//! let config = OrientedSearchConfig::default();
//!
//! let outcome = search_oriented_schedule(
//!     &scene.source,
//!     &scene.source_normals,
//!     &scene.target,
//!     &scene.target_normals,
//!     &solver,
//!     &config,
//! )?;
//!
//! println!("best cost {} at {:?}", outcome.cost, outcome.schedule);
//! ```
//!
//! ## Conventions
//!
//! Point sets are `nalgebra::DMatrix<f64>` with one point per row (n×D,
//! D = 2 or 3). Correspondence matrices are soft weights, source rows by
//! target columns; they need not be normalized.

#![warn(missing_docs)]

// Point sets, warps, and annealing schedules
pub mod core;

// Error types
pub mod error;

// Objective evaluators for both model variants
pub mod objective;

// Built-in demo problems
pub mod scenes;

// Annealing-schedule grid search
pub mod search;

// Re-export commonly used types
pub use core::points::{normalize_rows, row_norms, sq_dist_matrix, OrientedSet};
pub use core::schedule::{NormalSchedule, PointSchedule};
pub use core::warp::{AffineWarp, IdentityWarp, Warp};

pub use error::{RegError, Result};

pub use objective::{
    oriented_objective, point_objective, Objective, OrientedObjective, OrientedRegistration,
    PointObjective, PointRegistration, Registration,
};

pub use scenes::{Scene, DEMO_COUNT};

pub use search::{
    search_oriented_schedule, search_point_schedule, FitParams, OrientedFit, OrientedProvider,
    OrientedSearchConfig, OrientedSearchOutcome, PointFit, PointProvider, PointSearchConfig,
    PointSearchOutcome,
};
