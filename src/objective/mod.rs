//! Objective evaluators and registration results.
//!
//! Registration quality decomposes into interpretable terms: alignment
//! error, warp-reported smoothness energies, and correspondence entropy.
//! The points-only model has five terms, the points-with-normals model
//! eight; [`Registration`] dispatches to the matching evaluator.

mod oriented;
mod point;
mod result;

pub use oriented::{oriented_objective, OrientedObjective};
pub use point::{point_objective, PointObjective};
pub use result::{Objective, OrientedRegistration, PointRegistration, Registration};
