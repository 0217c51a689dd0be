//! Core value types: point sets, warps, and annealing schedules.

pub mod points;
pub mod schedule;
pub mod warp;
